use crate::distribute::HitTotals;
use crate::literal::{Literal, LiteralError, parse_literal};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Key under which the raw text of an unparseable blob is preserved.
pub const UNPARSED_KEY: &str = "unparsed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

/// Request parameters of one logged request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamMap {
    values: BTreeMap<String, ParamValue>,
    #[serde(skip)]
    unparsed: bool,
}

impl ParamMap {
    /// Parses a logged parameter blob. A blob that cannot be parsed is kept
    /// verbatim under [`UNPARSED_KEY`].
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "unparseable request parameters");
                Self::unparsed(raw)
            }
        }
    }

    pub fn try_parse(raw: &str) -> Result<Self, LiteralError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let Literal::Dict(entries) = parse_literal(raw)? else {
            return Err(LiteralError::Shape {
                expected: "a dict of parameters",
            });
        };

        let mut values = BTreeMap::new();
        for (key, value) in entries {
            let Some(key) = key.to_text() else {
                return Err(LiteralError::Shape {
                    expected: "scalar parameter names",
                });
            };

            let value = match value {
                Literal::List(items) | Literal::Tuple(items) => ParamValue::List(
                    items
                        .iter()
                        .map(|item| {
                            item.to_text().ok_or(LiteralError::Shape {
                                expected: "scalar list items",
                            })
                        })
                        .collect::<Result<_, _>>()?,
                ),
                Literal::Dict(_) => {
                    return Err(LiteralError::Shape {
                        expected: "scalar or list parameter values",
                    });
                }
                scalar => ParamValue::Text(scalar.to_text().unwrap_or_default()),
            };

            values.insert(key, value);
        }

        Ok(Self {
            values,
            unparsed: false,
        })
    }

    fn unparsed(raw: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(UNPARSED_KEY.to_string(), ParamValue::Text(raw.to_string()));
        Self {
            values,
            unparsed: true,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        self.unparsed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Text value; a list-valued parameter yields its first element.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            ParamValue::Text(s) => Some(s),
            ParamValue::List(items) => items.first().map(String::as_str),
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get_str(name)?.trim().parse().ok()
    }

    /// List value, expanding comma-joined and prefix-compressed text.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.values.get(name) {
            None => Vec::new(),
            Some(ParamValue::Text(s)) => decode_list_param(s),
            Some(ParamValue::List(items)) => {
                items.iter().flat_map(|item| decode_list_param(item)).collect()
            }
        }
    }
}

/// Splits a list parameter at commas and full stops, expanding one level of
/// parenthesised common prefixes: `LAM_A(HLA,NTR)` is `LAM_AHLA, LAM_ANTR`.
/// Nested parentheses are not supported. Items are kept as split, including
/// empty ones.
pub fn decode_list_param(value: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut prefix = String::new();

    for elem in value.split(['.', ',']) {
        let item = match elem.find(['(', ')']) {
            Some(i) if elem[i..].starts_with('(') => {
                prefix = elem[..i].to_string();
                format!("{prefix}{}", &elem[i + 1..])
            }
            Some(i) => {
                let item = format!("{prefix}{}", &elem[..i]);
                prefix.clear();
                item
            }
            None => format!("{prefix}{elem}"),
        };
        out.push(item);
    }

    out
}

/// Per-corpus hit totals of one request, keyed by lower-cased corpus id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusHitMap {
    pub totals: HitTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unparsed: Option<String>,
}

impl CorpusHitMap {
    /// Parses a logged hit blob. An unparseable blob yields an empty map
    /// that keeps the raw text.
    pub fn parse(raw: &str) -> Self {
        match Self::try_parse(raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "unparseable hit counts");
                Self {
                    totals: HitTotals::new(),
                    unparsed: Some(raw.to_string()),
                }
            }
        }
    }

    pub fn try_parse(raw: &str) -> Result<Self, LiteralError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let Literal::Dict(entries) = parse_literal(raw)? else {
            return Err(LiteralError::Shape {
                expected: "a dict of corpus hit counts",
            });
        };

        let mut totals = HitTotals::new();
        for (corpus, hits) in entries {
            let Some(corpus) = corpus.as_str() else {
                return Err(LiteralError::Shape {
                    expected: "corpus ids as keys",
                });
            };
            let hits = hit_count(&hits).ok_or(LiteralError::Shape {
                expected: "non-negative integer hit counts",
            })?;

            *totals.entry(corpus.to_lowercase()).or_insert(0) += hits;
        }

        Ok(Self {
            totals,
            unparsed: None,
        })
    }

    pub fn is_unparsed(&self) -> bool {
        self.unparsed.is_some()
    }

    pub fn total(&self) -> u64 {
        self.totals.values().sum()
    }
}

fn hit_count(value: &Literal) -> Option<u64> {
    match value {
        Literal::Int(i) => u64::try_from(*i).ok(),
        Literal::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Some(*f as u64),
        Literal::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}
