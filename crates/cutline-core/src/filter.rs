//! Typed filter-expression builder.
//!
//! Every filter string handed to the render backend is built from
//! [`Filter`] values (a name plus ordered arguments). Argument values are
//! stored raw and escaped exactly once, when the filter is rendered with
//! `Display`. Chains join with `,`, graph nodes join with `;`.
//!
//! The backend unescapes twice: once when splitting the graph into filters
//! and once when splitting a filter's arguments. [`escape_filter_value`]
//! applies both levels in the matching order.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// Characters with meaning inside a filter's argument list.
const OPTION_SPECIAL: [char; 3] = ['\\', '\'', ':'];

/// Characters with meaning in the graph description.
const GRAPH_SPECIAL: [char; 6] = ['\\', '\'', '[', ']', ',', ';'];

fn escape_chars(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a raw value for use as a filter argument inside a graph.
///
/// First the argument level (backslash, single quote, colon), then the
/// graph level (backslash, single quote, square brackets, comma, semicolon).
/// A literal colon therefore renders as `\\:` and an expression comma as
/// `\,`.
pub fn escape_filter_value(raw: &str) -> String {
    escape_chars(&escape_chars(raw, &OPTION_SPECIAL), &GRAPH_SPECIAL)
}

/// Format a number for a filter argument: at most four decimals, no
/// trailing zeros, and never `-0`.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        return "0".into();
    }
    format!("{rounded}")
}

#[derive(Debug, Clone, PartialEq)]
enum FilterArg {
    Positional(String),
    Named(String, String),
}

/// A single filter invocation, e.g. `eq=brightness=0.1:contrast=1.2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: String,
    args: SmallVec<[FilterArg; 6]>,
}

impl Filter {
    /// Create a filter with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: SmallVec::new(),
        }
    }

    /// Append a `key=value` argument. The value is escaped on render.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(FilterArg::Named(key.into(), value.into()));
        self
    }

    /// Append a numeric `key=value` argument.
    pub fn num(self, key: impl Into<String>, value: f64) -> Self {
        self.arg(key, fmt_num(value))
    }

    /// Append a positional argument.
    pub fn positional(mut self, value: impl Into<String>) -> Self {
        self.args.push(FilterArg::Positional(value.into()));
        self
    }

    /// Filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw (unescaped) value of a named argument.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.iter().find_map(|a| match a {
            FilterArg::Named(k, v) if k == key => Some(v.as_str()),
            _ => None,
        })
    }

    /// Number of arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            f.write_str(if i == 0 { "=" } else { ":" })?;
            match arg {
                FilterArg::Positional(v) => f.write_str(&escape_filter_value(v))?,
                FilterArg::Named(k, v) => write!(f, "{}={}", k, escape_filter_value(v))?,
            }
        }
        Ok(())
    }
}

/// An ordered, comma-joined sequence of filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    /// Append another chain's filters after this one's.
    pub fn append(&mut self, other: FilterChain) {
        self.filters.extend(other.filters);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Names of the filters in order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Return this chain, or a single passthrough filter when empty.
    pub fn or_passthrough(self, passthrough: &str) -> Self {
        if self.is_empty() {
            Self::from(vec![Filter::new(passthrough)])
        } else {
            self
        }
    }
}

impl From<Vec<Filter>> for FilterChain {
    fn from(filters: Vec<Filter>) -> Self {
        Self { filters }
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}

/// One `;`-separated segment of a filter graph: labelled inputs, a chain,
/// labelled outputs. Labels are stored without brackets.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub inputs: Vec<String>,
    pub chain: FilterChain,
    pub outputs: Vec<String>,
}

impl GraphNode {
    pub fn new(
        inputs: impl IntoIterator<Item = impl Into<String>>,
        chain: impl Into<FilterChain>,
        outputs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            chain: chain.into(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Filter> for FilterChain {
    fn from(filter: Filter) -> Self {
        Self::from(vec![filter])
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.inputs {
            write!(f, "[{label}]")?;
        }
        write!(f, "{}", self.chain)?;
        for label in &self.outputs {
            write!(f, "[{label}]")?;
        }
        Ok(())
    }
}

/// A complete filter graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    nodes: Vec<GraphNode>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, other: FilterGraph) {
        self.nodes.extend(other.nodes);
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every label produced inside the graph is consumed by at
    /// most one later node, and that no node consumes a label produced
    /// after it. External inputs (labels never produced here) are ignored.
    pub fn check_labels(&self) -> std::result::Result<(), String> {
        let mut produced_at: HashMap<&str, usize> = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            for out in &node.outputs {
                if produced_at.insert(out.as_str(), i).is_some() {
                    return Err(format!("label [{out}] is produced twice"));
                }
            }
        }

        let mut consumed: HashMap<&str, usize> = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            for input in &node.inputs {
                if let Some(&at) = produced_at.get(input.as_str()) {
                    if at >= i {
                        return Err(format!("label [{input}] is consumed before it is produced"));
                    }
                    let count = consumed.entry(input.as_str()).or_insert(0);
                    *count += 1;
                    if *count > 1 {
                        return Err(format!("label [{input}] has more than one consumer"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Labels produced by the graph that no node consumes.
    pub fn terminal_outputs(&self) -> Vec<&str> {
        let consumed: Vec<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.inputs.iter().map(String::as_str))
            .collect();
        self.nodes
            .iter()
            .flat_map(|n| n.outputs.iter().map(String::as_str))
            .filter(|label| !consumed.contains(label))
            .collect()
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
