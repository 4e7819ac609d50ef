use crate::grouping::{CorpusGroup, GroupingResolver, GroupingRule};
use pretty_assertions::assert_eq;

/// Helper: a rule table where an override must win over the family prefix.
fn newspaper_rules() -> GroupingResolver {
    GroupingResolver::new(vec![
        GroupingRule::full_match("klk_fi_early", r"klk_fi_18[0-9]{2}").unwrap(),
        GroupingRule::prefix("klk_fi"),
        GroupingRule::prefix("klk"),
        GroupingRule::full_match("ftb", r"ftb[0-9]+").unwrap(),
    ])
}

#[test]
fn prefix_rule_groups_family_members() {
    let resolver = newspaper_rules();

    let resolved = resolver.resolve("klk_fi_1923");

    assert_eq!(resolved.group, "klk_fi");
    assert!(resolved.grouped);
}

#[test]
fn override_rule_takes_priority_over_prefix() {
    let resolver = newspaper_rules();

    assert_eq!(resolver.resolve("klk_fi_1855").group, "klk_fi_early");
    assert_eq!(resolver.resolve("klk_sv_1855").group, "klk");
}

#[test]
fn prefix_requires_underscore_separator() {
    let resolver = newspaper_rules();

    let resolved = resolver.resolve("klkx_1923");

    assert_eq!(resolved.group, "klkx_1923");
    assert!(!resolved.grouped);
}

#[test]
fn override_rule_is_a_full_match() {
    let resolver = newspaper_rules();

    assert_eq!(resolver.resolve("ftb3").group, "ftb");
    assert_eq!(resolver.resolve("ftb3_extra").group, "ftb3_extra");
    assert_eq!(resolver.resolve("xftb3").group, "xftb3");
}

#[test]
fn unmatched_corpus_is_its_own_group() {
    let resolver = newspaper_rules();

    let resolved = resolver.resolve("suomi24");

    assert_eq!(resolved.group, "suomi24");
    assert!(!resolved.grouped);
}

#[test]
fn resolving_a_group_name_is_idempotent() {
    let resolver = newspaper_rules();

    for corpus in ["klk_sv_1900", "ftb2", "suomi24"] {
        let group = resolver.resolve(corpus).group.to_string();
        let again = resolver.resolve(&group);

        assert_eq!(again.group, group);
    }
}

#[test]
fn nested_family_name_resolves_to_the_broader_group() {
    let resolver = newspaper_rules();

    // "klk_fi" itself falls under the "klk" prefix rule.
    assert_eq!(resolver.resolve("klk_fi").group, "klk");
}

#[test]
fn empty_rule_table_groups_nothing() {
    let resolver = GroupingResolver::default();

    assert_eq!(resolver.resolve("klk_fi_1923").group, "klk_fi_1923");
}

#[test]
fn group_all_collects_members_in_first_seen_order() {
    // Arrange
    let resolver = newspaper_rules();

    // Act
    let groups = resolver.group_all(["klk_fi_1923", "suomi24", "klk_fi_1901", "klk_fi_1923"]);

    // Assert
    assert_eq!(
        groups,
        vec![
            CorpusGroup {
                name: "klk_fi".to_string(),
                grouped: true,
                members: vec!["klk_fi_1923".to_string(), "klk_fi_1901".to_string()],
            },
            CorpusGroup {
                name: "suomi24".to_string(),
                grouped: false,
                members: vec!["suomi24".to_string()],
            },
        ]
    );
}
