//! Operator resolution over a merged document tree.
//!
//! The [`Evaluator`] owns the composite tree produced by the merge stage
//! and drives the resolution pass: discover every operator call, build the
//! dependency graph over their locations, order it topologically, evaluate
//! each call in order (writing results back into the tree), and finally
//! apply the prune set. Any failure aborts the run; the tree is only
//! authoritative after [`run`](Evaluator::run) returns `Ok`.
//!
//! Evaluation is single-threaded and strictly ordered: later calls may
//! read values written by earlier calls in the same pass, which is why
//! each call site is re-read and re-parsed at its turn rather than
//! evaluated from the discovery snapshot.

pub mod dependency_graph;

use serde_yaml::Value;
use tracing::{debug, trace};

use crate::core::GraftError;
use crate::operators::parse::parse_call;
use crate::operators::{Argument, OperatorCall, OperatorRegistry, ResolvedArg};
use crate::tree;
use crate::tree::path::Path;
use dependency_graph::DependencyGraph;

/// Resolves operator calls in a merged tree, in dependency order.
pub struct Evaluator {
    tree: Value,
    registry: OperatorRegistry,
}

impl Evaluator {
    /// Create an evaluator over `tree` with the built-in operators.
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self::with_registry(tree, OperatorRegistry::with_builtins())
    }

    /// Create an evaluator over `tree` with a caller-supplied registry.
    #[must_use]
    pub fn with_registry(tree: Value, registry: OperatorRegistry) -> Self {
        Self { tree, registry }
    }

    /// The current tree. Authoritative only after a successful
    /// [`run`](Self::run).
    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Consume the evaluator, yielding the tree.
    #[must_use]
    pub fn into_tree(self) -> Value {
        self.tree
    }

    /// Resolve every operator call, then delete the `prune` paths.
    ///
    /// On error the tree is left in a partially-resolved state and must
    /// not be emitted.
    pub fn run(&mut self, prune: &[Path]) -> Result<(), GraftError> {
        let sites = self.discover();
        if !sites.is_empty() {
            let graph = self.build_graph(&sites)?;
            let order = graph.evaluation_order()?;
            debug!(calls = order.len(), "resolving operator calls");
            for site in order {
                self.evaluate_site(&site)?;
            }
        }
        self.apply_prune(prune);
        Ok(())
    }

    /// Every operator call in the tree with its location, in document
    /// order. Discovery order is the topological tie-break.
    fn discover(&self) -> Vec<(Path, OperatorCall)> {
        tree::scalar_locations(&self.tree)
            .into_iter()
            .filter_map(|(path, scalar)| parse_call(&scalar).map(|call| (path, call)))
            .collect()
    }

    /// Build the dependency graph over `sites`.
    ///
    /// A reference argument either overlaps some operator site above or
    /// below it in the tree (an ordering edge), or must already resolve
    /// to a concrete value; anything else is a dangling reference.
    fn build_graph(&self, sites: &[(Path, OperatorCall)]) -> Result<DependencyGraph, GraftError> {
        let mut graph = DependencyGraph::new();
        for (path, _) in sites {
            graph.ensure_node(path.clone());
        }

        for (site, call) in sites {
            for arg in &call.args {
                let reference = match arg {
                    Argument::Reference(path) => path,
                    Argument::Literal(_) => continue,
                };

                let mut overlaps_a_site = false;
                for (other, _) in sites {
                    if other.is_prefix_of(reference) || reference.is_prefix_of(other) {
                        graph.add_dependency(site, other);
                        overlaps_a_site = true;
                    }
                }

                if !overlaps_a_site && tree::get(&self.tree, reference).is_none() {
                    return Err(GraftError::UnresolvedReference {
                        path: reference.clone(),
                        site: site.clone(),
                    });
                }
            }
        }

        trace!(nodes = graph.node_count(), edges = graph.edge_count(), "dependency graph built");
        Ok(graph)
    }

    /// Evaluate the call at `site` and write its result over the site.
    ///
    /// The site is re-read at its turn: an earlier evaluation may have
    /// replaced the whole subtree it lives in, in which case there is
    /// nothing left to do.
    fn evaluate_site(&mut self, site: &Path) -> Result<(), GraftError> {
        let scalar = match tree::get(&self.tree, site).and_then(Value::as_str) {
            Some(scalar) => scalar.to_string(),
            None => {
                trace!(%site, "site no longer holds a scalar, skipping");
                return Ok(());
            }
        };
        let call = match parse_call(&scalar) {
            Some(call) => call,
            None => {
                trace!(%site, "site no longer holds an operator call, skipping");
                return Ok(());
            }
        };

        let op = self.registry.get(&call.name).ok_or_else(|| GraftError::UnknownOperator {
            name: call.name.clone(),
            path: site.clone(),
        })?;
        let args = resolve_args(&self.tree, site, &call)?;

        debug!(%site, operator = %call.name, "evaluating");
        let result = op
            .evaluate(&self.tree, &args)
            .map_err(|source| GraftError::OperatorEval { path: site.clone(), source })?;
        tree::set(&mut self.tree, site, result);
        Ok(())
    }

    /// Delete every prune path present in the tree. Absent paths are
    /// silently ignored.
    fn apply_prune(&mut self, prune: &[Path]) {
        for path in prune {
            let removed = tree::delete(&mut self.tree, path);
            debug!(%path, removed, "pruning");
        }
    }
}

/// Resolve a call's arguments against the current tree.
fn resolve_args(
    tree: &Value,
    site: &Path,
    call: &OperatorCall,
) -> Result<Vec<ResolvedArg>, GraftError> {
    call.args
        .iter()
        .map(|arg| {
            let value = match arg {
                Argument::Literal(value) => value.clone(),
                Argument::Reference(path) => tree::get(tree, path).cloned().ok_or_else(|| {
                    GraftError::UnresolvedReference { path: path.clone(), site: site.clone() }
                })?,
            };
            Ok(ResolvedArg { value, origin: arg.clone() })
        })
        .collect()
}
