pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
// A lone dash carries no key, so it is matched as a plain token.
pub(crate) const STANDALONE_DASH: &str = "-";
