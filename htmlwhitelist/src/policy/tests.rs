#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;

#[test]
fn test_default_flags_are_conservative() {
    let flags = PolicyFlags::default();
    assert!(!flags.contains(PolicyFlags::ALLOW_JAVASCRIPT_PREFIX));
    assert!(!flags.contains(PolicyFlags::ALLOW_QUERYSTRING));
    assert_eq!(SanitizePolicy::default().flags, PolicyFlags::empty());
}

#[test]
fn test_policy_flag_builders() {
    let policy = SanitizePolicy::default()
        .allow_javascript_prefix(true)
        .allow_querystring(true);
    assert_eq!(policy.flags, PolicyFlags::all());

    let policy = policy.allow_javascript_prefix(false);
    assert_eq!(policy.flags, PolicyFlags::ALLOW_QUERYSTRING);

    let policy = policy.with_flags(PolicyFlags::ALLOW_JAVASCRIPT_PREFIX);
    assert_eq!(policy.flags, PolicyFlags::ALLOW_JAVASCRIPT_PREFIX);
}

#[test]
fn test_last_entry_wins() {
    let list: AllowList = vec![("a", vec!["href"]), ("a", vec!["title"])]
        .into_iter()
        .collect();
    assert_eq!(list.len(), 1);
    assert!(list.is_attribute_allowed("a", "title"));
    assert!(!list.is_attribute_allowed("a", "href"));

    let mut list = AllowList::new();
    assert_eq!(list.insert("b", ["x"]), None);
    let previous = list.insert("b", ["y"]).unwrap();
    assert!(previous.contains("x"));
}

#[test]
fn test_empty_attribute_set_allows_bare_tag() {
    let list = AllowList::new().allow("br", Vec::<String>::new());
    assert!(list.is_tag_allowed("br"));
    assert!(!list.is_attribute_allowed("br", "class"));
    assert!(list.attributes("br").unwrap().is_empty());
}

#[test]
fn test_lookups_are_case_sensitive() {
    let list = AllowList::new().allow("a", ["href"]);
    assert!(!list.is_tag_allowed("A"));
    assert!(!list.is_attribute_allowed("a", "HREF"));
    assert!(!list.is_attribute_allowed("p", "href"));
}

#[test]
fn test_parse_compact_syntax() {
    let list: AllowList = " a[href | title],b ,img[src|alt]\tbr[] ".parse().unwrap();
    assert_eq!(list.len(), 4);
    assert!(list.is_attribute_allowed("a", "href"));
    assert!(list.is_attribute_allowed("a", "title"));
    assert!(list.is_attribute_allowed("img", "alt"));
    assert!(list.attributes("b").unwrap().is_empty());
    assert!(list.attributes("br").unwrap().is_empty());

    assert!("".parse::<AllowList>().unwrap().is_empty());
    assert!(" , ".parse::<AllowList>().unwrap().is_empty());
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "[href]".parse::<AllowList>(),
        Err(PolicyParseError::EmptyTagName { position: 0 })
    );
    assert_eq!(
        "a[href".parse::<AllowList>(),
        Err(PolicyParseError::UnterminatedAttributeList {
            tag: "a".to_string(),
            position: 1
        })
    );
    assert_eq!(
        "a[href||title]".parse::<AllowList>(),
        Err(PolicyParseError::EmptyAttributeName {
            tag: "a".to_string(),
            position: 7
        })
    );
    assert_eq!(
        "a[href]x".parse::<AllowList>(),
        Err(PolicyParseError::UnexpectedCharacter { ch: 'x', position: 7 })
    );
    assert_eq!(
        "a[on=x]".parse::<AllowList>(),
        Err(PolicyParseError::UnexpectedCharacter { ch: '=', position: 4 })
    );
    assert_eq!(
        "<script>".parse::<AllowList>(),
        Err(PolicyParseError::UnexpectedCharacter { ch: '<', position: 0 })
    );
}

#[test]
fn test_parse_error_messages() {
    let err = "a[href".parse::<AllowList>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "attribute list of tag `a` opened at position 1 is never closed"
    );
}

#[test]
fn test_display_round_trip() {
    let list = AllowList::new()
        .allow("img", ["src", "alt"])
        .allow("a", ["href"])
        .allow("br", [] as [&str; 0]);
    let text = list.to_string();
    assert_eq!(text, "a[href] br img[alt|src]");
    assert_eq!(text.parse::<AllowList>().unwrap(), list);
}

#[test]
fn test_display_of_names_outside_compact_syntax() {
    let list = AllowList::new().allow("a b", ["x|y"]);
    let text = list.to_string();
    assert_eq!(text, "a b[x|y]");

    let parsed: AllowList = text.parse().unwrap();
    assert_ne!(parsed, list);
    assert!(parsed.is_tag_allowed("a"));
    assert!(parsed.is_attribute_allowed("b", "y"));
}

#[test]
fn test_policy_from_str() {
    let policy: SanitizePolicy = "p a[href]".parse().unwrap();
    assert_eq!(policy.flags, PolicyFlags::empty());
    assert!(policy.allow_list.is_attribute_allowed("a", "href"));
}

#[test]
fn test_iter_is_sorted_by_tag() {
    let list: AllowList = "p b a".parse().unwrap();
    let tags: Vec<&str> = list.iter().map(|(tag, _)| tag).collect();
    assert_eq!(tags, ["a", "b", "p"]);
}
