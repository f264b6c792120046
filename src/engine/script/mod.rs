use regex::Regex;

use crate::domain::error::ScriptError;
use crate::domain::script::{ParsedScript, ScriptAssertion, TestBlock, UnmatchedKey};
use crate::domain::shape::Schema;

struct ScriptPatterns {
    test: Regex,
    expect: Regex,
    predicate: Regex,
    expected_type: Regex,
}

impl ScriptPatterns {
    fn new() -> Result<Self, ScriptError> {
        Ok(Self {
            test: Regex::new(
                r#"pm\.test\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|`([^`]*)`)"#,
            )?,
            expect: Regex::new(r"pm\.expect\(\s*([^,)]+?)\s*[,)]")?,
            predicate: Regex::new(r"\b(null\w*)\s*\(")?,
            expected_type: Regex::new(r#"\.to\.be\.an?\(\s*["'](\w+)["']\s*\)"#)?,
        })
    }
}

struct OpenBlock {
    index: usize,
    depth: usize,
}

/// Scans a Postman test script for `pm.test` blocks and `pm.expect` calls.
///
/// The script is read line by line. A block spans from its `pm.test(` line
/// until the brace depth falls back to the depth it opened at; expectations
/// belong to the innermost open block.
pub fn parse_script(source: &str) -> Result<ParsedScript, ScriptError> {
    let patterns = ScriptPatterns::new()?;
    let mut parsed = ParsedScript::default();
    let mut open: Vec<OpenBlock> = Vec::new();
    let mut depth = 0usize;

    for (offset, line) in source.lines().enumerate() {
        let line_number = offset + 1;
        let code = strip_line_comment(line);

        if let Some(captures) = patterns.test.captures(code) {
            let description = captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            parsed.tests.push(TestBlock {
                description,
                line: line_number,
                assertions: Vec::new(),
            });
            open.push(OpenBlock {
                index: parsed.tests.len() - 1,
                depth,
            });
        }

        for assertion in parse_expectations(&patterns, code, line_number) {
            match open.last() {
                Some(block) => parsed.tests[block.index].assertions.push(assertion),
                None => parsed.ungrouped.push(assertion),
            }
        }

        depth = apply_braces(depth, code);
        while open.last().is_some_and(|block| depth <= block.depth) {
            open.pop();
        }
    }

    Ok(parsed)
}

fn parse_expectations(
    patterns: &ScriptPatterns,
    code: &str,
    line_number: usize,
) -> Vec<ScriptAssertion> {
    let calls: Vec<_> = patterns.expect.captures_iter(code).collect();
    let mut assertions = Vec::with_capacity(calls.len());
    for (position, captures) in calls.iter().enumerate() {
        let (Some(call), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        // Everything up to the next expectation belongs to this one.
        let tail_end = calls
            .get(position + 1)
            .and_then(|next| next.get(0))
            .map_or(code.len(), |next| next.start());
        let tail = &code[call.end()..tail_end];

        let mut predicates: Vec<String> = Vec::new();
        for predicate in patterns.predicate.captures_iter(tail) {
            if let Some(name) = predicate.get(1)
                && !predicates.iter().any(|seen| seen == name.as_str())
            {
                predicates.push(name.as_str().to_string());
            }
        }
        let expected_type = patterns
            .expected_type
            .captures(tail)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string());

        assertions.push(ScriptAssertion {
            key: key.as_str().trim().to_string(),
            predicates,
            expected_type,
            line: line_number,
        });
    }
    assertions
}

/// Drops a trailing `//` comment that is not inside a string literal.
fn strip_line_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous_slash = false;
    for (index, ch) in line.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => {
                quote = Some(ch);
                previous_slash = false;
            }
            '/' if previous_slash => return &line[..index - 1],
            '/' => previous_slash = true,
            _ => previous_slash = false,
        }
    }
    line
}

/// Applies the line's braces outside string literals to `depth`.
fn apply_braces(mut depth: usize, code: &str) -> usize {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in code.chars() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// Lists expectation keys whose field path is not declared in `schema`.
///
/// The first key segment is the item binding (`obj` in
/// `response.forEach((obj) => ...)`) and is dropped before lookup. Single
/// segment keys name the response itself and are not looked up.
pub fn unmatched_keys(parsed: &ParsedScript, schema: &Schema) -> Vec<UnmatchedKey> {
    let grouped = parsed.tests.iter().flat_map(|block| {
        block
            .assertions
            .iter()
            .map(move |assertion| (Some(block.description.as_str()), assertion))
    });
    let ungrouped = parsed.ungrouped.iter().map(|assertion| (None, assertion));

    grouped
        .chain(ungrouped)
        .filter_map(|(test, assertion)| {
            let (_, path) = assertion.key.split_once('.')?;
            if schema.contains_path(path) {
                return None;
            }
            Some(UnmatchedKey {
                test: test.map(ToOwned::to_owned),
                key: assertion.key.clone(),
                path: path.to_string(),
                line: assertion.line,
            })
        })
        .collect()
}
