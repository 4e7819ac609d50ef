//! Corpus grouping.
//!
//! Related corpora (e.g. the yearly parts of one newspaper collection) are
//! reported both individually and rolled up under a logical group name. The
//! rule table is ordered: the first rule that matches a corpus decides its
//! group, so narrow override rules must come before the broad prefix rule of
//! the same family.

#[cfg(test)]
mod tests;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum GroupPattern {
    /// Corpus id begins with `<group>_`.
    Prefix,
    /// Corpus id matches the whole expression.
    Override(Regex),
}

#[derive(Debug, Clone)]
pub struct GroupingRule {
    pub group: String,
    pub pattern: GroupPattern,
}

impl GroupingRule {
    pub fn prefix(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            pattern: GroupPattern::Prefix,
        }
    }

    /// Builds an override rule; the expression is anchored at both ends.
    pub fn full_match(group: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            group: group.into(),
            pattern: GroupPattern::Override(Regex::new(&format!("^(?:{pattern})$"))?),
        })
    }

    fn matches(&self, corpus: &str) -> bool {
        match &self.pattern {
            GroupPattern::Prefix => corpus
                .strip_prefix(self.group.as_str())
                .is_some_and(|rest| rest.starts_with('_')),
            GroupPattern::Override(re) => re.is_match(corpus),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<'a> {
    pub group: &'a str,
    pub grouped: bool,
}

/// A logical group and the corpora of one request that fell into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusGroup {
    pub name: String,
    pub grouped: bool,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupingResolver {
    rules: Vec<GroupingRule>,
}

impl GroupingResolver {
    pub fn new(rules: Vec<GroupingRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[GroupingRule] {
        &self.rules
    }

    pub fn resolve<'a>(&'a self, corpus: &'a str) -> Resolved<'a> {
        self.rules
            .iter()
            .find(|rule| rule.matches(corpus))
            .map(|rule| Resolved {
                group: rule.group.as_str(),
                grouped: true,
            })
            .unwrap_or(Resolved {
                group: corpus,
                grouped: false,
            })
    }

    /// Groups `corpora` in order of first appearance. Duplicate corpora are
    /// listed once per group.
    pub fn group_all<'c, I>(&self, corpora: I) -> Vec<CorpusGroup>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let mut groups: Vec<CorpusGroup> = Vec::new();

        for corpus in corpora {
            let resolved = self.resolve(corpus);

            match groups.iter_mut().find(|g| g.name == resolved.group) {
                Some(group) => {
                    if !group.members.iter().any(|m| m == corpus) {
                        group.members.push(corpus.to_string());
                    }
                }
                None => groups.push(CorpusGroup {
                    name: resolved.group.to_string(),
                    grouped: resolved.grouped,
                    members: vec![corpus.to_string()],
                }),
            }
        }

        groups
    }
}
