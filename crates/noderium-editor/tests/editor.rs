use std::cell::RefCell;
use std::rc::Rc;

use noderium_editor::theme;
use noderium_editor::{
    Change, DecorationSet, DecorationSpec, Document, EditorOptions, MarkdownEditor, Selection,
    Transaction, Viewport,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn mount(content: &str) -> MarkdownEditor {
    MarkdownEditor::mount(EditorOptions {
        value: Some(content.to_string()),
        ..Default::default()
    })
}

fn set<'a>(editor: &'a MarkdownEditor, pass: &str) -> &'a DecorationSet {
    editor.view().pass_decorations(pass).unwrap()
}

fn type_text(editor: &mut MarkdownEditor, text: &str) {
    let head = editor.view().state().selection().head;
    editor.dispatch(
        Transaction::change(Change::insert(head, text))
            .with_selection(Selection::cursor(head + text.len())),
    );
}

fn render(set: &DecorationSet) -> String {
    set.iter()
        .map(|d| {
            let mut line = format!("{}..{} {}", d.from, d.to, d.class().unwrap_or("replace"));
            if let Some(number) = d.spec.attribute(theme::DATA_CODE_LINE) {
                line.push_str(&format!(" line={number}"));
            }
            if let Some(lang) = d.spec.attribute(theme::DATA_CODE_LANG) {
                line.push_str(&format!(" lang={lang}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn fixture_round_trips_through_document() {
    let md = fixture("daily_note");
    let doc = Document::from_bytes(md.as_bytes()).unwrap();
    assert_eq!(doc.to_bytes(), md.as_bytes());

    let mut editor = mount(&md);
    editor.dispatch(Transaction::change(Change::insert(2, "Very ")));
    editor.dispatch(Transaction::change(Change::delete(2, 7)));
    assert_eq!(editor.value(), md);
}

#[test]
fn fixture_hides_nothing_on_the_cursor_line() {
    let md = fixture("daily_note");
    let mut editor = mount(&md);
    let lines = editor.view().state().doc().lines();

    for number in 1..=lines {
        let line = editor.view().state().doc().line(number);
        editor.dispatch(Transaction::select(Selection::cursor(line.from)));

        let hidden_on_line = editor
            .view()
            .decorations()
            .flat_map(|(_, set)| set.iter())
            .filter(|d| d.from >= line.from && d.from < line.to)
            .filter(|d| {
                matches!(d.spec, DecorationSpec::Replace { .. })
                    || matches!(
                        d.class(),
                        Some(theme::HIDE_MARKDOWN | theme::HIDE_MARKDOWN_FENCE | theme::HIDE_LINK_SYNTAX)
                    )
            })
            .count();
        assert_eq!(hidden_on_line, 0, "line {number}: {:?}", line.text);
    }
}

#[test]
fn fixture_same_line_moves_keep_every_set() {
    let md = fixture("daily_note");
    let mut editor = mount(&md);
    let line = editor.view().state().doc().line(3);
    editor.dispatch(Transaction::select(Selection::cursor(line.from)));

    let before: Vec<DecorationSet> = editor
        .view()
        .decorations()
        .map(|(_, set)| set.clone())
        .collect();

    editor.dispatch(Transaction::select(Selection::cursor(line.to)));
    editor.dispatch(Transaction::select(Selection::range(line.from, line.to)));

    for ((name, after), before) in editor.view().decorations().zip(&before) {
        assert!(after.ptr_eq(before), "{name} recomputed");
    }
}

#[test]
fn fixture_setext_heading_is_level_two() {
    let md = fixture("daily_note");
    let editor = mount(&md);
    let doc = editor.view().state().doc();
    let heading = (1..=doc.lines())
        .map(|n| doc.line(n))
        .find(|line| line.text == "Setext heading")
        .unwrap();

    let classes: Vec<&str> = set(&editor, "semantic-styles")
        .iter()
        .filter(|d| d.from == heading.from && d.to == heading.from)
        .filter_map(|d| d.class())
        .collect();
    assert_eq!(classes, vec!["cm-md-heading-2"]);
}

#[test]
fn code_block_decorations() {
    let editor = mount("```sh\nls\n```\n");
    insta::assert_snapshot!(render(set(&editor, "code-blocks")), @r"
    0..0 cm-md-codeblock-fence
    0..5 cm-md-codeblock-fence-text
    6..6 cm-md-codeblock cm-md-codeblock-line cm-md-codeblock-lang-sh line=1 lang=sh
    9..9 cm-md-codeblock-fence
    9..12 cm-md-codeblock-fence-text
    ");
}

fn long_document() -> String {
    let mut text = String::new();
    for i in 0..120 {
        text.push_str(&format!("Paragraph {i}\n"));
    }
    text.push_str("```toml\n");
    for i in 0..60 {
        text.push_str(&format!("key_{i} = {i}\n"));
    }
    text.push_str("```\n");
    text
}

#[rstest]
#[case::direct(&[])]
#[case::from_top(&[1])]
#[case::from_middle(&[90])]
#[case::back_and_forth(&[170, 1, 90])]
fn scroll_path_does_not_change_code_lines(#[case] stops: &[usize]) {
    let text = long_document();
    let mut expected_editor = mount(&text);
    let doc = expected_editor.view().state().doc().clone();
    let page = |first: usize| Viewport::new(doc.line(first).from, doc.line(first + 10).to);

    expected_editor.set_viewport(page(150));
    let expected = set(&expected_editor, "code-blocks").clone();

    let mut editor = mount(&text);
    for &stop in stops {
        editor.set_viewport(page(stop));
    }
    editor.set_viewport(page(150));

    assert_eq!(set(&editor, "code-blocks").as_slice(), expected.as_slice());
    let first_code_line = expected
        .iter()
        .find_map(|d| d.spec.attribute(theme::DATA_CODE_LINE))
        .unwrap();
    // Line 148 is the 27th line after the opening fence on line 121
    assert_eq!(first_code_line, "27");
}

#[test]
fn typing_a_list_and_leaving_it() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    let mut editor = MarkdownEditor::mount(EditorOptions {
        value: Some(String::new()),
        on_change: Some(Box::new(move |text: &str| sink.borrow_mut().push(text.to_string()))),
        ..Default::default()
    });

    type_text(&mut editor, "- a");
    assert!(editor.handle_key("Enter"));
    assert!(editor.handle_key("Enter"));
    type_text(&mut editor, "done");

    assert_eq!(editor.value(), "- a\ndone");
    assert_eq!(
        *changes.borrow(),
        vec!["- a", "- a\n- ", "- a\n", "- a\ndone"]
    );
}
