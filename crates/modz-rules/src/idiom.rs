//! Idiom definitions: static metadata plus a matcher.
//!
//! An idiom never builds output text itself. A firing matcher returns a
//! `Match` naming the reported node, a message key, the captured sub-nodes
//! and a replacement template; the fix synthesizer and reporter turn that
//! into a diagnostic.

use modz_parser::NodeIndex;
use smallvec::SmallVec;

use crate::context::MatchContext;
use crate::precedence::Precedence;

/// How a match's replacement is offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixMode {
    /// Applied by `--fix`.
    Autofix,
    /// Attached as a named suggestion; never applied automatically.
    Suggestion { message_key: &'static str },
    /// Reported without any replacement.
    ReportOnly,
}

/// Static description of one idiom.
#[derive(Debug)]
pub struct IdiomMeta {
    pub id: &'static str,
    pub description: &'static str,
    /// Node kinds the matcher is dispatched on.
    pub kinds: &'static [u16],
    /// Message key to template; templates may use `{capture}` placeholders.
    pub messages: &'static [(&'static str, &'static str)],
    pub fix: FixMode,
    /// True if the idiom cannot run soundly without a type service.
    pub requires_types: bool,
}

impl IdiomMeta {
    pub fn message(&self, key: &str) -> Option<&'static str> {
        self.messages
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

/// A recognizer for one idiom.
pub trait Idiom: Send + Sync {
    fn meta(&self) -> &'static IdiomMeta;

    /// Inspect `node` (of one of `meta().kinds`) and return a match or decline.
    fn check(&self, ctx: &MatchContext<'_>, node: NodeIndex) -> Option<Match>;
}

/// A captured piece of the matched source.
#[derive(Clone, Debug, PartialEq)]
pub enum Capture {
    /// Verbatim source text of a node.
    Node(NodeIndex),
    /// Verbatim source text of a node, parenthesized when the node binds
    /// more loosely than the position it is spliced into.
    Operand(NodeIndex, Precedence),
    /// Verbatim source text of a run of sibling nodes, separators included.
    Range(NodeIndex, NodeIndex),
    /// Text computed by the matcher from other captures.
    Text(String),
}

/// A validated idiom occurrence.
#[derive(Clone, Debug)]
pub struct Match {
    /// The node the finding and fix are reported on.
    pub node: NodeIndex,
    pub message_key: &'static str,
    pub captures: SmallVec<[(&'static str, Capture); 4]>,
    /// Replacement template with `{capture}` placeholders.
    pub template: Option<&'static str>,
    /// How tightly the rendered replacement binds.
    pub precedence: Precedence,
}

impl Match {
    pub fn new(node: NodeIndex, message_key: &'static str) -> Match {
        Match {
            node,
            message_key,
            captures: SmallVec::new(),
            template: None,
            precedence: Precedence::Primary,
        }
    }

    pub fn capture(mut self, name: &'static str, capture: Capture) -> Match {
        self.captures.push((name, capture));
        self
    }

    pub fn node_capture(self, name: &'static str, node: NodeIndex) -> Match {
        self.capture(name, Capture::Node(node))
    }

    pub fn operand(self, name: &'static str, node: NodeIndex, min: Precedence) -> Match {
        self.capture(name, Capture::Operand(node, min))
    }

    pub fn text(self, name: &'static str, text: impl Into<String>) -> Match {
        self.capture(name, Capture::Text(text.into()))
    }

    pub fn with_template(mut self, template: &'static str, precedence: Precedence) -> Match {
        self.template = Some(template);
        self.precedence = precedence;
        self
    }

    pub fn get(&self, name: &str) -> Option<&Capture> {
        self.captures
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, capture)| capture)
    }
}
