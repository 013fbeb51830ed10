/// Decoder behavior for an object key that no field of the target aggregate declares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Fail with `Error::UnknownField`.
    #[default]
    Reject,
    /// Consume and discard the value under the key.
    Skip,
}

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decoding options. The default is strict and bounds nesting at 128 levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub unknown_fields: UnknownFields,
    /// Deepest nesting of arrays and objects the decoder descends into.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unknown_fields: UnknownFields::Reject,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Default options, except that unknown aggregate keys are skipped.
    pub fn lenient() -> Self {
        Config {
            unknown_fields: UnknownFields::Skip,
            ..Config::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
