//! Associativity fixer.
//!
//! The parser builds chains of equal-precedence binary operators
//! right-leaning: `a OP1 (b OP2 (c OP3 d))`, because each level's "right
//! operand" rule recurses back into the same level rather than the next
//! one (see [`crate::parser`]). For left-associative operators this gives
//! the wrong evaluation order on mixed-operator runs — `1 - 2 + 3` must be
//! `(1 - 2) + 3`, not `1 - (2 + 3)`.
//!
//! `fix` walks the tree and, for every maximal run of nodes sharing a
//! precedence class along the right spine, rebuilds it left-leaning:
//! `((a OP1 b) OP2 c) OP3 d`. This reaches the same final shape as the
//! original's in-place `swapTrees`/`swap` pointer surgery, but gets there
//! by collecting the run's operators and operands into flat lists and
//! left-folding them back into a tree — ownership makes that the more
//! direct translation than mutating node identities in place.
//!
//! One behavioral difference from the original: `adjustAst` only ever
//! follows `left` children and the right spine, so a bracket-index
//! sub-expression stored in `right_list` (present whenever a path has more
//! than one trailing step, e.g. `param.Array[1 - 2 + 3][0]`) never gets
//! straightened. That looks like an oversight — the single-step case
//! (stored in `right` instead of `right_list`) *does* get fixed by the
//! same walk — so this port fixes every `right_list` entry too.

use crate::ast::{Node, Op};

pub fn fix(mut node: Node) -> Node {
    if let Some(left) = node.left.take() {
        node.left = Some(Box::new(fix(*left)));
    }
    if !node.right_list.is_empty() {
        node.right_list = std::mem::take(&mut node.right_list)
            .into_iter()
            .map(fix)
            .collect();
    }

    if node.op.is_chainable() {
        straighten(node)
    } else {
        if let Some(right) = node.right.take() {
            node.right = Some(Box::new(fix(*right)));
        }
        node
    }
}

/// Collects a maximal same-precedence run starting at `node` and
/// left-folds it into a left-leaning tree. `node.op` is assumed chainable.
fn straighten(node: Node) -> Node {
    let base = node.op.precedence();
    let mut operands = Vec::new();
    let mut ops = Vec::new();
    let mut current = node;

    loop {
        let left = *current
            .left
            .take()
            .expect("chainable node always has a left operand");
        operands.push(fix(left));
        ops.push((current.op, current.span));

        let right = *current
            .right
            .take()
            .expect("chainable node always has a right operand");
        if right.op.is_chainable() && right.op.precedence() == base {
            current = right;
        } else {
            operands.push(fix(right));
            break;
        }
    }

    let mut operands = operands.into_iter();
    let mut result = operands.next().expect("run collects at least one operand");
    for (op, span) in ops {
        let rhs = operands
            .next()
            .expect("operand count always exceeds operator count by one");
        result = Node::binary(op, result, rhs, span);
    }
    result
}
