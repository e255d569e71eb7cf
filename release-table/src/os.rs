use std::str::FromStr;

/// Operating systems we know how to name nicely. The strum serializations are the tokens used in
/// Go-style release asset names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
pub(crate) enum Os {
    #[strum(serialize = "darwin")]
    MacOS,
    #[strum(serialize = "linux")]
    Linux,
    #[strum(serialize = "windows")]
    Windows,
}

impl Os {
    pub(crate) fn from_token(token: &str) -> Option<Os> {
        Os::from_str(token).ok()
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Os::MacOS => "MacOS",
            Os::Linux => "Linux",
            Os::Windows => "Windows",
        }
    }
}

/// Returns the human-readable name for an OS token, or the token itself if it is not one we know.
pub(crate) fn humanize_os(token: &str) -> String {
    Os::from_token(token).map_or_else(|| token.to_string(), |os| os.label().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::darwin("darwin", "MacOS")]
    #[case::linux("linux", "Linux")]
    #[case::windows("windows", "Windows")]
    #[case::unknown("freebsd", "freebsd")]
    #[case::case_sensitive("Linux", "Linux")]
    #[case::upper_darwin("Darwin", "Darwin")]
    fn humanize(#[case] token: &str, #[case] expect: &str) {
        assert_eq!(humanize_os(token), expect);
    }

    #[test]
    fn token_round_trip() {
        for os in [Os::MacOS, Os::Linux, Os::Windows] {
            assert_eq!(Os::from_token(os.as_ref()), Some(os));
        }
    }
}
