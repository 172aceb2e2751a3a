use super::*;

fn remark(
    text: &str,
    line: u32,
) -> SourceRemark {
    SourceRemark {
        text: text.to_string(),
        line,
    }
}

const SOURCE: &str = r##"#include <stdio.h>
// counts calls
static int counter; /* shared */

  #if defined(DEBUG)
void log_call(const char *msg) {
    puts("# not a directive // nor a comment");
}
#endif
/* multi
   line */
"##;

#[test]
fn lists_comments_with_start_lines() {
    assert_eq!(
        comments(SOURCE),
        vec![remark("// counts calls", 2), remark("/* shared */", 3), remark("/* multi\n   line */", 10),]
    );
}

#[test]
fn lists_directives_with_start_lines() {
    assert_eq!(
        preprocessor_statements(SOURCE),
        vec![remark("#include <stdio.h>", 1), remark("#if defined(DEBUG)", 5), remark("#endif", 9),]
    );
}

#[test]
fn directive_after_block_comment_still_counts() {
    assert_eq!(preprocessor_statements("/* guard */ #pragma once\n"), vec![remark("#pragma once", 1)]);
}

#[test]
fn continued_directive_reports_first_line() {
    let statements = preprocessor_statements("int a;\n#define PAIR(a, b) \\\n    a, b\nint c;\n");
    assert_eq!(statements, vec![remark("#define PAIR(a, b) \\\n    a, b", 2)]);
}

#[test]
fn continued_line_comment_is_one_comment() {
    let listed = comments("// spans \\\n   two lines\nint x; // after\n");
    assert_eq!(listed, vec![remark("// spans \\\n   two lines", 1), remark("// after", 3)]);
}

#[test]
fn empty_source_has_no_listings() {
    assert!(comments("").is_empty());
    assert!(preprocessor_statements("").is_empty());
}
