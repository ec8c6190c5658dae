use command_tree_core::{ArgumentSpec, Example, OptionSpec, ValueKind};
use command_tree_help::{
    FixedInvocation, HelpDoc, HelpStyle, PlainStyle, SubcommandSummary, display_width,
    render_help, render_help_styled,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pad(n: usize) -> String {
    " ".repeat(n)
}

fn lines(rows: &[String]) -> String {
    let mut text = rows.join("\n");
    text.push('\n');
    text
}

fn deploy_options() -> Vec<OptionSpec> {
    vec![
        OptionSpec::value("env", "Target environment")
            .alias("e")
            .required()
            .choices(["dev", "prod"]),
        OptionSpec::flag("force", "Skip confirmation").alias("f"),
        OptionSpec::value("replicas", "Replica count")
            .kind(ValueKind::Number)
            .default_value(2)
            .group("Scaling"),
        OptionSpec::flag("dry-run", "Print the plan"),
        OptionSpec::flag("notify", "Send notification"),
        OptionSpec::value("channel", "Notification channel"),
    ]
}

/// Removes ANSI SGR sequences.
fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

struct Ansi;

impl HelpStyle for Ansi {
    fn heading(&self, text: &str) -> String {
        format!("\x1b[1m{text}\x1b[0m")
    }

    fn flag(&self, text: &str) -> String {
        format!("\x1b[36m{text}\x1b[0m")
    }

    fn dim(&self, text: &str) -> String {
        format!("\x1b[2m{text}\x1b[0m")
    }

    fn required_marker(&self, text: &str) -> String {
        format!("\x1b[31m{text}\x1b[0m")
    }
}

// ---------------------------------------------------------------------------
// Full documents
// ---------------------------------------------------------------------------

#[test]
fn test_leaf_command_full_output() {
    let aliases = vec!["d".to_string()];
    let options: Vec<OptionSpec> = deploy_options().into_iter().take(4).collect();
    let arguments = vec![
        ArgumentSpec::required("target", "What to deploy").choices(["web", "api"]),
        ArgumentSpec::optional("tag", "Release tag"),
    ];
    let examples = vec![
        Example::new("app deploy web -e prod", Some("Deploy web to prod")),
        Example::new("app d api -e dev --force", None),
    ];
    let doc = HelpDoc {
        path: vec!["app", "deploy"],
        route: vec!["deploy"],
        aliases: &aliases,
        description: Some("Deploy the application"),
        options: &options,
        arguments: &arguments,
        examples: &examples,
        ..HelpDoc::new("deploy")
    };

    let expected = lines(&[
        "deploy (d)".into(),
        "  Deploy the application".into(),
        String::new(),
        "Usage:".into(),
        "  app deploy [options] <target> [tag]".into(),
        String::new(),
        "Arguments:".into(),
        format!("  * target (web|api){}What to deploy", pad(10)),
        format!("    tag{}Release tag", pad(23)),
        String::new(),
        "Scaling:".into(),
        format!("  --replicas <value>{}Replica count (default: 2)", pad(14)),
        String::new(),
        "Options:".into(),
        "  * -e, --env <value> (dev|prod)  Target environment".into(),
        format!("  -f, --force{}Skip confirmation", pad(21)),
        format!("  --dry-run{}Print the plan", pad(23)),
        String::new(),
        "Examples:".into(),
        "  app deploy web -e prod   Deploy web to prod".into(),
        "  app d api -e dev --force".into(),
    ]);

    assert_eq!(
        render_help(&doc, &FixedInvocation::new("app")),
        expected
    );
}

#[test]
fn test_root_with_subcommands_full_output() {
    let root_options = vec![OptionSpec::flag("verbose", "Verbose output")];
    let deploy = deploy_options();
    let status = vec![OptionSpec::flag("watch", "Watch for changes")];
    let doc = HelpDoc {
        description: Some("Demo"),
        version: Some("1.2.0"),
        options: &root_options,
        subcommands: vec![
            SubcommandSummary {
                name: "deploy",
                description: Some("Deploy"),
                options: &deploy,
            },
            SubcommandSummary {
                name: "status",
                description: None,
                options: &status,
            },
            SubcommandSummary {
                name: "部署",
                description: Some("Deploy (zh)"),
                options: &[],
            },
        ],
        ..HelpDoc::new("app")
    };

    let expected = lines(&[
        "app".into(),
        "  Demo".into(),
        String::new(),
        "Usage:".into(),
        "  app <command> [options]".into(),
        String::new(),
        "Options:".into(),
        format!("  --verbose{}Verbose output", pad(11)),
        String::new(),
        "Subcommands:".into(),
        "  deploy.   Deploy".into(),
        format!("    -e.{}Target environment", pad(10)),
        format!("    -f.{}Skip confirmation", pad(10)),
        "    --replicas.  Replica count".into(),
        "    --dry-run.   Print the plan".into(),
        "    --notify.    Send notification".into(),
        "    ... +1 more options".into(),
        "  status.".into(),
        "    --watch.     Watch for changes".into(),
        "  部署.     Deploy (zh)".into(),
        String::new(),
        "Hint: view subcommand help, e.g.: app deploy --help".into(),
        String::new(),
        "Version: 1.2.0".into(),
    ]);

    assert_eq!(
        render_help(&doc, &FixedInvocation::new("app")),
        expected
    );
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

#[test]
fn test_wide_option_names_share_description_column() {
    let options = vec![
        OptionSpec::value("名称", "名字").alias("n"),
        OptionSpec::flag("verbose", "Verbose output"),
        OptionSpec::flag("全角", "Ｆｕｌｌ").required(),
    ];
    let doc = HelpDoc {
        options: &options,
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    let rows: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "Options:")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();

    assert_eq!(rows.len(), 3);
    for (row, option) in rows.iter().zip(&options) {
        let idx = row.find(&option.description).unwrap();
        assert_eq!(display_width(&row[..idx]), 22, "row: {row:?}");
    }
}

#[test]
fn test_widest_option_keeps_gutter() {
    let options = vec![OptionSpec::value("configuration-file", "Config path").alias("c")];
    let doc = HelpDoc {
        options: &options,
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    assert!(text.contains("  -c, --configuration-file <value>  Config path\n"));
}

#[test]
fn test_long_argument_name_keeps_gutter() {
    let arguments = vec![ArgumentSpec::required(
        "an-unusually-long-argument-name",
        "Still readable",
    )];
    let doc = HelpDoc {
        arguments: &arguments,
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    assert!(text.contains("  * an-unusually-long-argument-name  Still readable\n"));
}

#[test]
fn test_wide_examples_align_by_display_width() {
    let examples = vec![
        Example::new("app 部署 web", Some("Chinese route")),
        Example::new("app deploy web", Some("English route")),
    ];
    let doc = HelpDoc {
        examples: &examples,
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    // Both commands are narrower than the 20-column floor.
    assert!(text.contains(&format!("  app 部署 web{}Chinese route", pad(9))));
    assert!(text.contains(&format!("  app deploy web{}English route", pad(7))));
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[test]
fn test_groups_render_in_first_seen_order_before_ungrouped() {
    let options = vec![
        OptionSpec::flag("plain", "Ungrouped"),
        OptionSpec::flag("zeta", "Zeta").group("Output"),
        OptionSpec::flag("alpha", "Alpha").group("Auth"),
        OptionSpec::flag("beta", "Beta").group("Output"),
    ];
    let doc = HelpDoc {
        options: &options,
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    let headings: Vec<&str> = text.lines().filter(|l| l.ends_with(':')).collect();
    assert_eq!(headings, vec!["Usage:", "Output:", "Auth:", "Options:"]);

    let output = text.find("Output:").unwrap();
    let auth = text.find("Auth:").unwrap();
    let beta = text.find("--beta").unwrap();
    assert!(output < beta && beta < auth);
}

#[test]
fn test_custom_usage_replaces_synthesized_line_and_drives_hint() {
    let deploy = vec![OptionSpec::flag("force", "Force")];
    let doc = HelpDoc {
        usage: Some("app <command> [options]\napp --version"),
        subcommands: vec![SubcommandSummary {
            name: "deploy",
            description: Some("Deploy"),
            options: &deploy,
        }],
        ..HelpDoc::new("app")
    };

    let text = render_help(&doc, &FixedInvocation::new("./target/debug/app"));

    assert!(text.contains("Usage:\n  app <command> [options]\n  app --version\n\n"));
    assert!(text.contains(
        "Hint: view subcommand help, e.g.: ./target/debug/app app deploy --help\n"
    ));
}

#[test]
fn test_nested_hint_includes_route() {
    let doc = HelpDoc {
        path: vec!["app", "db"],
        route: vec!["db"],
        subcommands: vec![SubcommandSummary {
            name: "create-user",
            description: Some("Create a user"),
            options: &[],
        }],
        ..HelpDoc::new("db")
    };

    let text = render_help(&doc, &FixedInvocation::new("app"));
    assert!(text.contains("  app db <command>\n"));
    assert!(text.contains("e.g.: app db create-user --help\n"));
}

#[test]
fn test_minimal_document() {
    let text = render_help(&HelpDoc::new("tool"), &FixedInvocation::new("tool"));

    assert_eq!(text, "tool\n\nUsage:\n  tool\n");
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

#[test]
fn test_styled_output_matches_plain_once_stripped() {
    let aliases = vec!["d".to_string()];
    let options = deploy_options();
    let arguments = vec![ArgumentSpec::required("target", "What").choices(["web", "api"])];
    let examples = vec![Example::new("app deploy web", Some("Deploy web"))];
    let status = vec![OptionSpec::flag("watch", "Watch")];
    let doc = HelpDoc {
        aliases: &aliases,
        version: Some("0.1.0"),
        options: &options,
        arguments: &arguments,
        examples: &examples,
        subcommands: vec![SubcommandSummary {
            name: "status",
            description: Some("Show status"),
            options: &status,
        }],
        ..HelpDoc::new("deploy")
    };
    let invocation = FixedInvocation::new("app");

    let plain = render_help_styled(&doc, &invocation, &PlainStyle);
    let styled = render_help_styled(&doc, &invocation, &Ansi);

    assert_ne!(plain, styled);
    assert_eq!(strip_ansi(&styled), plain);
}
