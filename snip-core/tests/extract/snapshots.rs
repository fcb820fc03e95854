use crate::common::buffer;
use snip_core::template::extracted_snippet_template;
use snip_core::{extract, ExtractOptions};

const LIST: &str = "<ul>\n    <li class=\"item\">First</li>\n    <li class=\"item\">Second</li>\n</ul>\n";

#[test]
fn test_repeated_attribute_shares_placeholder() {
    let buf = buffer(
        LIST,
        &[(9, 9), (20, 24), (26, 31), (52, 56), (58, 64), (69, 69)],
    );
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    insta::assert_snapshot!(template, @r#"
<li class="${102:item}">${104:First}</li>
<li class="${102:item}">${108:Second}</li>
"#);
}

#[test]
fn test_nested_block_keeps_relative_indentation() {
    let text = "class A:\n    def run(self):\n        return self.value\n";
    let buf = buffer(text, &[(13, 13), (17, 20), (48, 53), (53, 53)]);
    let template = extract(&buf, &ExtractOptions::default()).expect("extract");

    insta::assert_snapshot!(template, @r"
def ${102:run}(self):
    return self.${104:value}
");
}

#[test]
fn test_extracted_template_header() {
    let buf = buffer("let foo = bar;", &[(4, 7), (10, 13)]);
    let contents = extract(&buf, &ExtractOptions::default()).expect("extract");
    let template = extracted_snippet_template(&contents, "source.rust meta.block.rust");

    let identity_start = template.find("${6:").expect("uuid placeholder") + 4;
    let identity_end = identity_start + template[identity_start..].find('}').unwrap();
    let redacted = format!(
        "{}<uuid>{}",
        &template[..identity_start],
        &template[identity_end..]
    );

    insta::assert_snapshot!(redacted, @r"
---
name: ${1:name}
tabTrigger: ${2:tabTrigger}
scope: ${3:${4:meta.block.rust} ${5:source.rust}}
uuid: ${6:<uuid>}
---
${101:foo} = ${103:bar}
");
}
