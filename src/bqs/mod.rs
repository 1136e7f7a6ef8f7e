//! Boolean Query Syntax compiler.
//!
//! `compile` runs the full pipeline: tokenize, parse leniently, lower onto
//! flat record fields, then conjoin the implicit OBSOLETE baseline unless
//! the query already guards against that status itself.
//!
//! ```
//! use nsili_core::bqs::compile;
//!
//! let filter = compile("NSIL_CARD.identifier like '%'", true)?;
//! assert!(filter.has_obsolete_guard());
//! # Ok::<(), nsili_core::Error>(())
//! ```

pub mod ast;
pub mod filter;
pub mod lexer;
pub mod lower;
pub mod parser;

use tracing::debug;

pub use filter::{BoolOp, CompareOp, FilterNode, Literal, SpatialOp};

use crate::Result;

/// Compile a BQS query string into an executable filter.
///
/// `include_source_as_field` controls whether `sourceLibrary` terms map to
/// the `sourceId` record field or are dropped from the query entirely.
pub fn compile(bqs: &str, include_source_as_field: bool) -> Result<FilterNode> {
    debug!(query = bqs, include_source_as_field, "compiling query");
    let tokens = lexer::tokenize(bqs)?;
    let expr = parser::Parser::new(&tokens).parse_query()?;
    let lowered = lower::lower(expr, include_source_as_field)?;
    let filter = match lowered {
        None => FilterNode::catch_all(),
        Some(node) if node.has_obsolete_guard() => node,
        Some(node) => FilterNode::and(vec![node, FilterNode::obsolete_baseline()]),
    };
    debug!(?filter, "compiled query");
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_query_is_bare_catch_all() {
        assert_eq!(compile("", true).unwrap(), FilterNode::catch_all());
        assert_eq!(compile("   ", true).unwrap(), FilterNode::catch_all());
    }

    #[test]
    fn test_baseline_conjoined_onto_plain_query() {
        let filter = compile("NSIL_FILE.title like 'mission%'", true).unwrap();
        let FilterNode::Boolean { op: BoolOp::And, children } = &filter else {
            panic!("expected and: {filter:?}")
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[1], FilterNode::obsolete_baseline());
    }

    #[test]
    fn test_baseline_suppressed_by_existing_guard() {
        let filter =
            compile("NSIL_FILE.title like '%' and not NSIL_CARD.status = 'OBSOLETE'", true)
                .unwrap();
        let FilterNode::Boolean { op: BoolOp::And, children } = &filter else { panic!() };
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(compile("NSIL_FILE.title like 'oops", true).is_err());
    }

    proptest! {
        #[test]
        fn test_compile_never_panics(input in "\\PC{0,64}") {
            let _ = compile(&input, true);
            let _ = compile(&input, false);
        }

        #[test]
        fn test_like_queries_always_guarded(title in "[a-zA-Z0-9 ]{1,20}") {
            let query = format!("NSIL_FILE.title like '{title}%'");
            let filter = compile(&query, true).unwrap();
            prop_assert!(filter.has_obsolete_guard());
        }
    }
}
