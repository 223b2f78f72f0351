use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub suffix: Option<String>,
}

impl VersionKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens: Vec<&str> = raw
            .split(['.', '(', ')'])
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() != 3 && tokens.len() != 4 {
            return None;
        }

        let major = parse_field(tokens[0])?;
        let minor = parse_field(tokens[1])?;
        let patch = parse_field(tokens[2])?;
        let suffix = tokens.get(3).map(|token| (*token).to_string());

        Some(Self {
            major,
            minor,
            patch,
            suffix,
        })
    }

    pub fn weighted_sum(&self) -> u64 {
        u64::from(self.major) * 100 + u64::from(self.minor) * 10 + u64::from(self.patch)
    }

    // Package names on released media rely on this exact ordering, including the
    // minor=10 / major+1 aliasing of the weighted sum. It is a total preorder,
    // not a structural order, so it stays a named method instead of Ord.
    pub fn compare(&self, other: &Self) -> Ordering {
        match self.weighted_sum().cmp(&other.weighted_sum()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }

        match (&self.suffix, &other.suffix) {
            (Some(left), Some(right)) => left.as_str().cmp(right.as_str()),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }

    pub fn normalized(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!(
                "{:02}.{:02}.{:02}({})",
                self.major, self.minor, self.patch, suffix
            ),
            None => format!("{:02}.{:02}.{:02}", self.major, self.minor, self.patch),
        }
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(
                formatter,
                "{}.{}.{}({})",
                self.major, self.minor, self.patch, suffix
            ),
            None => write!(formatter, "{}.{}.{}", self.major, self.minor, self.patch),
        }
    }
}

fn parse_field(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
