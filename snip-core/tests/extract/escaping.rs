use crate::common::{buffer, render_defaults};
use proptest::prelude::*;
use snip_core::buffer::Buffer;
use snip_core::region::span_of;
use snip_core::{extract, ExtractOptions};

fn span_text(buf: &snip_core::TextBuffer) -> String {
    buf.substring(span_of(buf.selections()).expect("selections"))
}

#[test]
fn test_metacharacters_survive_insertion() {
    let text = r"cost: ${price} \ total}";
    let buf = buffer(text, &[(0, 4), (6, 14), (15, 16), (17, 23)]);
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    assert_eq!(render_defaults(&template), text);
}

#[test]
fn test_dedup_reuses_lowest_index_for_escaped_text() {
    let buf = buffer("$a $a $b", &[(0, 2), (3, 5), (6, 8)]);
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    assert_eq!(template, r"${101:\$a} ${101:\$a} ${105:\$b}");
}

#[test]
fn test_crlf_blank_lines_survive_extraction() {
    let buf = buffer("a\r\n\r\nb", &[(0, 0), (6, 6)]);
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    assert_eq!(template, "a\r\n\r\nb");
    assert_eq!(render_defaults(&template), span_text(&buf));
}

#[test]
fn test_crlf_indented_block_is_dedented() {
    let text = "    x = 1\r\n\r\n    y = 2";
    let buf = buffer(text, &[(4, 5), (17, 18)]);
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    assert_eq!(template, "${101:x} = 1\r\n\r\n${103:y}");
}

fn text_and_selections() -> impl Strategy<Value = (String, Vec<(usize, usize)>)> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', '$', '\\', '}', '{', ':']), 1..24)
        .prop_flat_map(|chars| {
            let text: String = chars.into_iter().collect();
            let len = text.chars().count();
            let cuts = prop::collection::vec(0..=len, 2..8);
            (Just(text), cuts)
        })
        .prop_map(|(text, mut cuts)| {
            cuts.sort_unstable();
            let selections = cuts.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
            (text, selections)
        })
}

proptest! {
    #[test]
    fn extracted_template_renders_back_to_span_text((text, selections) in text_and_selections()) {
        let buf = buffer(&text, &selections);
        let template = extract(&buf, &ExtractOptions::default()).unwrap();

        prop_assert_eq!(render_defaults(&template), span_text(&buf));
        prop_assert_eq!(&template, &extract(&buf, &ExtractOptions::default()).unwrap());
    }
}
