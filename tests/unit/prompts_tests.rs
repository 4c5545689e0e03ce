use polytrans::prompts::{active_prompt, default_prompt_sets, select_prompt};

#[test]
fn test_default_prompt_sets_withNoSelection_shouldHaveExactlyOneActive() {
    let sets = default_prompt_sets();
    assert_eq!(sets.iter().filter(|s| s.enabled).count(), 1);
    assert_eq!(active_prompt(&sets).map(|s| s.name.as_str()), Some("translate"));
}

#[test]
fn test_select_prompt_withExistingName_shouldDeactivateOthers() {
    let mut sets = default_prompt_sets();
    assert!(select_prompt(&mut sets, "polish"));
    assert_eq!(sets.iter().filter(|s| s.enabled).count(), 1);
    assert_eq!(active_prompt(&sets).map(|s| s.name.as_str()), Some("polish"));
}

#[test]
fn test_select_prompt_withRepeatedSelection_shouldBeIdempotent() {
    let mut sets = default_prompt_sets();
    assert!(select_prompt(&mut sets, "summarize"));
    let snapshot = sets.clone();
    assert!(select_prompt(&mut sets, "summarize"));
    assert_eq!(sets, snapshot);
}

#[test]
fn test_select_prompt_withUnknownName_shouldChangeNothing() {
    let mut sets = default_prompt_sets();
    let snapshot = sets.clone();
    assert!(!select_prompt(&mut sets, "no-such-set"));
    assert_eq!(sets, snapshot);
}

#[test]
fn test_render_withPlaceholders_shouldSubstituteAll() {
    let sets = default_prompt_sets();
    let translate = active_prompt(&sets).expect("active set");
    let rendered = translate.render("en", "zh-cn", "hello world");

    let last = rendered.last().expect("final turn");
    assert_eq!(
        last.content,
        "Translate the following text from en to zh-cn: hello world"
    );
}

#[test]
fn test_render_withTemplate_shouldNotMutateIt() {
    let sets = default_prompt_sets();
    let translate = active_prompt(&sets).expect("active set");
    let template_before = translate.turns.last().unwrap().content.clone();

    let _ = translate.render("ja", "ko", "content that must not stick");

    assert_eq!(translate.turns.last().unwrap().content, template_before);
    assert!(template_before.contains("$content"));
}
