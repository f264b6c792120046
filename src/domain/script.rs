use serde::Serialize;

/// One `pm.test(...)` block and the expectations written directly inside it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestBlock {
    pub description: String,
    pub line: usize,
    pub assertions: Vec<ScriptAssertion>,
}

/// One `pm.expect(<key>, ...)` call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptAssertion {
    pub key: String,
    /// `null*` helper calls used by the assertion (`nullOrNumber`, ...).
    pub predicates: Vec<String>,
    /// Type named by `.to.be.a("...")` / `.to.be.an("...")`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
    pub line: usize,
}

/// Blocks in opening order, plus expectations found outside any block.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ParsedScript {
    pub tests: Vec<TestBlock>,
    pub ungrouped: Vec<ScriptAssertion>,
}

/// Expectation key with no matching field path in a shape schema.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnmatchedKey {
    pub test: Option<String>,
    pub key: String,
    /// Path looked up in the schema (the key without its item binding).
    pub path: String,
    pub line: usize,
}

/// Output of the `scripts` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScriptReport {
    #[serde(flatten)]
    pub script: ParsedScript,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched_keys: Option<Vec<UnmatchedKey>>,
}
