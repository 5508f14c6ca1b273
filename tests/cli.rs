//! Integration test suite for `srch` CLI
use assert_cmd::Command;

/// Helper function to run the `srch` binary with the given arguments and
/// return a [`assert_cmd::assert::Assert`].
fn run_main(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd =
        Command::cargo_bin("srch").expect("Failed to find main binary");
    cmd.args(args);
    cmd.assert()
}

/// Same as [`run_main`], feeding `stdin` to the process.
fn run_main_with_stdin(
    args: &[&str],
    stdin: &str,
) -> assert_cmd::assert::Assert {
    let mut cmd =
        Command::cargo_bin("srch").expect("Failed to find main binary");
    cmd.args(args).write_stdin(stdin.to_string());
    cmd.assert()
}

/// Collect STDOUT of a finished run into a string.
fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("Invalid UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOME_LIST: &str = "tests/data/some_list.json";
    const INDICES: &str = "tests/data/indices.json";
    const PEOPLE: &str = "tests/data/people.json";
    const MALFORMED: &str = "tests/data/malformed.json";

    #[test]
    fn full_tail_path() {
        let assert = run_main(&["fieldOne.isPresent", "true", SOME_LIST])
            .success()
            .code(0);
        assert_eq!(stdout_of(&assert), "someList.1.fieldOne.isPresent: true\n");
    }

    #[test]
    fn last_segment_only() {
        let assert =
            run_main(&["isPresent", "true", SOME_LIST]).success().code(0);
        assert_eq!(stdout_of(&assert), "someList.1.fieldOne.isPresent: true\n");
    }

    #[test]
    fn index_segment_must_match() {
        let assert = run_main(&["0.fieldOne.isPresent", "true", SOME_LIST])
            .success()
            .code(0);
        let output_str = stdout_of(&assert);
        assert!(
            output_str.trim().is_empty(),
            "Expected no output for mismatched index, got: {output_str:?}"
        );
    }

    #[test]
    fn regex_over_numbers() {
        let assert = run_main(&["index", "[0-2]", INDICES]).success().code(0);
        assert_eq!(
            stdout_of(&assert),
            "list.0.first.index: 0\nlist.0.second.index: 1\nlist.1.first.index: 2\n"
        );
    }

    #[test]
    fn numeric_range() {
        let assert =
            run_main(&["-n", "age", ">40<90", PEOPLE]).success().code(0);
        assert_eq!(stdout_of(&assert), "people.1.age: 85\npeople.2.age: 41\n");
    }

    #[test]
    fn numeric_range_ignores_strings() {
        let assert =
            run_main(&["--numeric", "name", ">=0", PEOPLE]).success().code(0);
        assert!(stdout_of(&assert).is_empty());
    }

    #[test]
    fn composite_value_is_compact() {
        let assert =
            run_main(&["people.2.tags", "^\\[\\]$", PEOPLE]).success().code(0);
        assert_eq!(stdout_of(&assert), "people.2.tags: []\n");
    }

    #[test]
    fn invalid_regex() {
        let assert = run_main(&["name", "(unclosed", PEOPLE]);
        let assert = assert.failure().code(1);
        assert!(stdout_of(&assert).is_empty());
    }

    #[test]
    fn invalid_numeric_range() {
        run_main(&["-n", "age", "=40", PEOPLE]).failure().code(1);
        run_main(&["-n", "age", ">5<2", PEOPLE]).failure().code(1);
    }

    #[test]
    fn invalid_search_path() {
        run_main(&["a..b", "x", PEOPLE]).failure().code(1);
    }

    #[test]
    fn stdin_input() {
        let assert = run_main_with_stdin(
            &["isPresent", "false"],
            r#"{"a": {"isPresent": false}}"#,
        )
        .success()
        .code(0);
        assert_eq!(stdout_of(&assert), "a.isPresent: false\n");
    }

    #[test]
    fn malformed_stdin_aborts() {
        run_main_with_stdin(&["a", "x"], "{not json").failure().code(1);
    }

    #[test]
    fn inline_json_string() {
        let assert = run_main(&["-j", r#"[{"v": "hit"}]"#, "v", "hit"])
            .success()
            .code(0);
        assert_eq!(stdout_of(&assert), "0.v: hit\n");
    }

    #[test]
    fn malformed_file_is_skipped() {
        let assert = run_main(&["isPresent", "true", MALFORMED, SOME_LIST])
            .failure()
            .code(2);
        assert_eq!(stdout_of(&assert), "someList.1.fieldOne.isPresent: true\n");
    }

    #[test]
    fn nonexistent_file_is_skipped() {
        let assert =
            run_main(&["isPresent", "true", "tests/data/nope.json", SOME_LIST])
                .failure()
                .code(2);
        assert_eq!(stdout_of(&assert), "someList.1.fieldOne.isPresent: true\n");
    }

    #[test]
    fn files_in_given_order() {
        let assert = run_main(&["-d", "isPresent", ".", SOME_LIST, SOME_LIST])
            .success()
            .code(0);
        assert_eq!(
            stdout_of(&assert),
            "someList.0.fieldOne.isPresent\n\
             someList.1.fieldOne.isPresent\n\
             someList.0.fieldOne.isPresent\n\
             someList.1.fieldOne.isPresent\n"
        );
    }

    #[test]
    fn file_path_output_with_single() {
        let assert = run_main(&["-p", "-s", "name", "A", PEOPLE, SOME_LIST])
            .success()
            .code(0);
        assert_eq!(stdout_of(&assert), format!("{PEOPLE}\n"));
    }

    #[test]
    fn custom_separators() {
        let assert =
            run_main(&["-f", "/", "1/fieldOne/isPresent", "true", SOME_LIST])
                .success()
                .code(0);
        assert_eq!(stdout_of(&assert), "someList/1/fieldOne/isPresent: true\n");

        let assert = run_main(&[
            "-f", "/", "-o", " > ", "1/fieldOne/isPresent", "true", SOME_LIST,
        ])
        .success()
        .code(0);
        assert_eq!(
            stdout_of(&assert),
            "someList > 1 > fieldOne > isPresent: true\n"
        );
    }

    #[test]
    fn hide_value() {
        let assert = run_main(&["--hide-value", "count", "3", PEOPLE])
            .success()
            .code(0);
        assert_eq!(stdout_of(&assert), "count\n");
    }

    #[test]
    fn forced_color() {
        let assert = run_main(&["--color", "always", "count", "3", PEOPLE])
            .success()
            .code(0);
        assert!(stdout_of(&assert).contains('\u{1b}'));
    }

    #[test]
    fn generate_shell_completions() {
        let assert =
            run_main(&["generate", "shell", "bash"]).success().code(0);
        assert!(stdout_of(&assert).contains("srch"));
    }

    #[test]
    fn double_dash_searches_subcommand_named_field() {
        let assert = run_main_with_stdin(
            &["--", "generate", "man"],
            r#"{"generate": "man pages"}"#,
        )
        .success()
        .code(0);
        assert_eq!(stdout_of(&assert), "generate: man pages\n");
    }
}
