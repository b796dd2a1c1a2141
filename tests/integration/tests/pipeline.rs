//! End-to-end tests of the parse → inline configuration → rules pipeline.

use std::path::PathBuf;

use linthtml_ast::Position;
use linthtml_core::{InlineConfig, Linter, LinterConfig, RuleSet};
use linthtml_parser::{HtmlParser, Parser};
use linthtml_text::get_lines;
use rstest::rstest;
use serde_json::json;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn linter(rules: &[(&str, serde_json::Value)]) -> Linter {
    let mut config = LinterConfig::new();
    for (name, value) in rules {
        config.rules.insert(name.to_string(), value.clone());
    }
    Linter::new(config).unwrap()
}

fn codes(issues: &[linthtml_core::Issue]) -> Vec<&str> {
    issues.iter().map(|i| i.code.as_str()).collect()
}

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn positions_of_nested_elements() {
        let source = "<body>\n  <div a=\"jofwei\">\n    TextTextText\n  </div>\n</body>\n";
        let doc = HtmlParser::new().parse(source);

        let body = doc.root_refs().next().unwrap();
        let body_el = body.as_element().unwrap();
        assert_eq!(body_el.open.loc.start, Position::new(1, 1));
        assert_eq!(body_el.open.loc.end, Position::new(1, 7));
        let body_close = body_el.close.unwrap();
        assert_eq!(body_close.loc.start, Position::new(5, 1));
        assert_eq!(body_close.loc.end, Position::new(5, 8));

        let div = body.child(1).unwrap();
        let div_el = div.as_element().unwrap();
        assert_eq!(div_el.name, "div");
        assert_eq!(div_el.open.loc.start, Position::new(2, 3));
        assert_eq!(div_el.open.loc.end, Position::new(2, 19));
        let div_close = div_el.close.unwrap();
        assert_eq!(div_close.loc.start, Position::new(4, 3));
        assert_eq!(div_close.loc.end, Position::new(4, 9));
    }

    #[rstest]
    #[case::lf("<p>a\nb\nc</p>")]
    #[case::crlf("<p>a\r\nb\r\n</p>")]
    #[case::mixed("<p>\ra\r\n\nb\n\r</p>")]
    fn text_lines_rebuild_node_data(#[case] source: &str) {
        let doc = HtmlParser::new().parse(source);
        let text = doc
            .iter()
            .find(|node| node.is_text())
            .unwrap();

        let lines = get_lines(&text, true).unwrap();
        let rebuilt: String = lines.iter().map(|line| line.text).collect();
        assert_eq!(Some(rebuilt.as_str()), text.data());
    }
}

mod inline_configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn previous_restores_configured_value() {
        let linter = linter(&[("line-end-style", json!("lf"))]);
        let source = concat!(
            "<!-- linthtml-configure line-end-style=\"crlf\" -->",
            "<p>\r\n</p>",
            "<!-- linthtml-configure line-end-style=\"$previous\" -->",
            "<p>\n</p>",
        );

        assert!(linter.lint_source(source).unwrap().is_empty());
    }

    #[test]
    fn directive_stays_in_effect_without_previous() {
        let linter = linter(&[("line-end-style", json!("lf"))]);
        let source = concat!(
            "<!-- linthtml-configure line-end-style=\"crlf\" -->",
            "<p>\r\n</p>",
            "<p>\n</p>",
        );

        let issues = linter.lint_source(source).unwrap();
        assert_eq!(codes(&issues), vec!["E015"]);
        assert_eq!(issues[0].position.start.line, 1);
        assert_eq!(issues[0].meta.data["format"], json!("lf"));
    }

    #[test]
    fn directive_enables_rule_for_rest_of_document() {
        let linter = linter(&[]);
        let source = "<p a a></p>\n<!-- linthtml-configure attr_no_dup=true -->\n<p b b></p>";

        let issues = linter.lint_source(source).unwrap();
        assert_eq!(codes(&issues), vec!["E003"]);
        assert_eq!(issues[0].position.start.line, 3);
    }

    #[test]
    fn bad_directives_become_issues() {
        let linter = linter(&[("attr-no-dup", json!(true))]);
        let source = concat!(
            "<!-- linthtml-configure unknown-rule=true -->\n",
            "<!-- linthtml-configure attr-no-dup=\"maybe\" -->\n",
            "<!-- linthtml-configure attr-no-dup={broken -->\n",
            "<p a a></p>",
        );

        let issues = linter.lint_source(source).unwrap();
        assert_eq!(codes(&issues), vec!["INLINE_02", "INLINE_01", "INLINE_03", "E003"]);
    }

    #[test]
    fn engine_follows_document_order() {
        let source = "<!-- linthtml-configure attr-no-dup=false --><p></p>";
        let doc = HtmlParser::new().parse(source);
        let rules = RuleSet::builtin();
        let mut config = InlineConfig::new(&rules);
        for node in doc.iter() {
            assert!(config.feed_comment(node.node()).unwrap().is_empty());
        }

        let comment_end = doc.root_refs().next().unwrap().end();
        let rejections = config.get_opts_at_index(comment_end + 1).unwrap();
        assert!(rejections.is_empty());
        assert_eq!(config.current().get("attr-no-dup"), Some(&json!(false)));

        assert!(config.get_opts_at_index(comment_end).is_err());
    }
}

mod linting_files {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lints_site_with_config_file() {
        let site = fixtures_dir().join("site");
        let config = LinterConfig::from_file(site.join(".linthtmlrc.json")).unwrap();
        let linter = Linter::new(config).unwrap();

        let (results, failures) = linter.lint_patterns(&["**/*.html".to_string()]).unwrap();
        assert!(failures.is_empty());

        let summary: Vec<(String, Vec<&str>)> = results
            .iter()
            .map(|result| {
                let relative = result
                    .path
                    .strip_prefix(&site)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                (relative, codes(&result.issues))
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("broken.html".to_string(), vec!["PARSE_02", "PARSE_01"]),
                ("index.html".to_string(), vec![]),
                ("pages/about.html".to_string(), vec!["E003"]),
            ]
        );

        let broken = &results[0].issues;
        assert_eq!(broken[0].position.start, Position::new(2, 10));
        assert_eq!(broken[1].position.start, Position::new(4, 1));

        let about = &results[2].issues[0];
        assert_eq!(about.position.start, Position::new(1, 13));
        assert_eq!(about.meta.data["attribute"], json!("id"));
    }
}
