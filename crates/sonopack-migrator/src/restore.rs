use anyhow::Result;

pub const PROBE_COMMAND_WORD: &str = "InitCheckVersion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Human,
    Veterinary,
}

impl ProductKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Veterinary => "vet",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "human" => Some(Self::Human),
            "vet" | "veterinary" => Some(Self::Veterinary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreExitCode {
    TypeChanged,
    SameType,
    NoSchema,
    Unrecognized(i32),
}

impl RestoreExitCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::TypeChanged,
            1 => Self::SameType,
            2 => Self::NoSchema,
            other => Self::Unrecognized(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSignal {
    CleanDelete,
    NoCleanDelete,
}

impl RestoreSignal {
    pub fn command_word(self) -> &'static str {
        match self {
            Self::CleanDelete => "CleanDelete",
            Self::NoCleanDelete => "NoCleanDelete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyDataChoice {
    KeepAside,
    Discard,
}

pub trait RestoreRunner {
    fn probe(&mut self, product: ProductKind) -> Result<i32>;
    fn signal(&mut self, signal: RestoreSignal, product: ProductKind) -> Result<()>;
}

pub trait MigrationPrompt {
    fn legacy_data_choice(&mut self, product: ProductKind) -> Result<LegacyDataChoice>;
}
