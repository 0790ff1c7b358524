//! Equivalence checks between source and target definitions.
//!
//! Two definitions are equivalent when their canonical renderings match
//! after the attributes the policy ignores are filtered out of both sides.

use oxide_ddl::ast::{quote_identifier, ColumnDef, Constraint, TableOption};
use tracing::trace;

use crate::policy::IgnorePolicy;

/// Compares two table option lists, skipping ignored option kinds and
/// options that only restore the server default.
#[must_use]
pub fn options_equivalent(
    source: &[TableOption],
    target: &[TableOption],
    policy: &IgnorePolicy,
) -> bool {
    let render = |options: &[TableOption]| {
        options
            .iter()
            .filter(|o| !o.is_reset() && !policy.ignores_table_option(&o.kind()))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };
    let (s, t) = (render(source), render(target));
    trace!(source = %s, target = %t, "Comparing table options");
    s == t
}

/// Compares two columns, skipping ignored column options.
#[must_use]
pub fn column_equivalent(source: &ColumnDef, target: &ColumnDef, policy: &IgnorePolicy) -> bool {
    let (s, t) = (render_column(source, policy), render_column(target, policy));
    trace!(source = %s, target = %t, "Comparing columns");
    s == t
}

/// Compares two constraints, without index options when those are ignored.
#[must_use]
pub fn constraint_equivalent(
    source: &Constraint,
    target: &Constraint,
    policy: &IgnorePolicy,
) -> bool {
    let render = |constraint: &Constraint| {
        if policy.index.options {
            constraint.without_options().to_string()
        } else {
            constraint.to_string()
        }
    };
    let (s, t) = (render(source), render(target));
    trace!(source = %s, target = %t, "Comparing constraints");
    s == t
}

fn render_column(column: &ColumnDef, policy: &IgnorePolicy) -> String {
    let mut out = format!("{} {}", quote_identifier(&column.name), column.data_type);
    for option in column
        .options
        .iter()
        .filter(|o| !policy.ignores_column_option(o.kind()))
    {
        out.push(' ');
        out.push_str(&option.to_string());
    }
    out
}
