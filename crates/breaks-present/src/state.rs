//! List UI state and its query-string form
//!
//! The state is three independent fields. Parsing is lenient: each field
//! falls back to its default on its own when the parameter is missing,
//! empty or unrecognized, so a hand-edited URL never fails.

use breaks_model::WcagVersion;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Query parameter for the arrangement
pub const PARAM_ARRANGEMENT: &str = "a";
/// Query parameter for the free-text filter
pub const PARAM_QUERY: &str = "q";
/// Query parameter for the WCAG version
pub const PARAM_VERSION: &str = "v";

/// State parameters in the order they are written
pub const PARAMS: [&str; 3] = [PARAM_ARRANGEMENT, PARAM_QUERY, PARAM_VERSION];

/// Primary grouping axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arrangement {
    /// One section per site area, one row per requirement
    #[default]
    Area,
    /// One section per requirement, one row per site area
    Failure,
}

impl Arrangement {
    /// Query-string form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arrangement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(Self::Area),
            "failure" => Ok(Self::Failure),
            other => Err(format!("unknown arrangement '{other}'")),
        }
    }
}

/// Complete UI state of the break list
///
/// Replaced wholesale on every transition, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    /// Grouping axis
    pub arrangement: Arrangement,
    /// Active WCAG version
    pub version: WcagVersion,
    /// Free-text filter; empty matches everything
    pub query: String,
}

impl ListState {
    /// Create state from explicit values
    #[must_use]
    pub fn new(arrangement: Arrangement, version: WcagVersion, query: impl Into<String>) -> Self {
        Self {
            arrangement,
            version,
            query: query.into(),
        }
    }

    /// Coerce raw field values, defaulting each one independently
    #[must_use]
    pub fn coerce(arrangement: Option<&str>, query: Option<&str>, version: Option<&str>) -> Self {
        let arrangement = lenient(PARAM_ARRANGEMENT, arrangement);
        let version = lenient(PARAM_VERSION, version);
        Self {
            arrangement,
            version,
            query: query.unwrap_or_default().to_string(),
        }
    }

    /// Coerce name/value pairs (query string or form fields)
    ///
    /// The first occurrence of each name wins; other names are ignored.
    #[must_use]
    pub fn from_pairs<'p, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Cow<'p, str>, Cow<'p, str>)>,
    {
        let mut values: [Option<Cow<'p, str>>; 3] = [None, None, None];
        for (name, value) in pairs {
            if let Some(slot) = PARAMS.iter().position(|p| *p == name) {
                values[slot].get_or_insert(value);
            }
        }
        let [arrangement, query, version] = values;
        Self::coerce(arrangement.as_deref(), query.as_deref(), version.as_deref())
    }

    /// Parse a URL query string, with or without the leading `?`
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Query string carrying all three fields (`a=..&q=..&v=..`)
    #[must_use]
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PARAM_ARRANGEMENT, self.arrangement.as_str())
            .append_pair(PARAM_QUERY, &self.query)
            .append_pair(PARAM_VERSION, self.version.as_str())
            .finish()
    }

    /// Write this state into an existing query string
    ///
    /// Unrelated parameters keep their position; the first occurrence of
    /// each state parameter is replaced in place and later duplicates are
    /// dropped; missing ones are appended.
    #[must_use]
    pub fn apply_to_query(&self, existing: &str) -> String {
        let existing = existing.strip_prefix('?').unwrap_or(existing);
        let values = [
            self.arrangement.as_str(),
            self.query.as_str(),
            self.version.as_str(),
        ];
        let mut written = [false; 3];
        let mut out = form_urlencoded::Serializer::new(String::new());

        for (name, value) in form_urlencoded::parse(existing.as_bytes()) {
            match PARAMS.iter().position(|p| *p == name) {
                Some(slot) if !written[slot] => {
                    out.append_pair(&name, values[slot]);
                    written[slot] = true;
                }
                Some(_) => {}
                None => {
                    out.append_pair(&name, &value);
                }
            }
        }
        for (slot, name) in PARAMS.iter().enumerate() {
            if !written[slot] {
                out.append_pair(name, values[slot]);
            }
        }
        out.finish()
    }
}

/// Parse a value, falling back to the default when absent, empty or invalid
fn lenient<T: FromStr + Default>(param: &str, value: Option<&str>) -> T {
    match value.filter(|v| !v.is_empty()) {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!("Ignoring invalid value '{}' for parameter '{}'", raw, param);
            T::default()
        }),
    }
}
