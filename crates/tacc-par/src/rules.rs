//! The 54 semantic-rule callbacks invoked by `Walker::reduce`: one arm per
//! production index, building an AST node and — for the productions that
//! carry code-generation meaning — emitting three-address instructions.

use tacc_lex::{basic_type_subtype, TokenSubtype};

use crate::ast::{AstNode, Payload, NO_CODE};
use crate::emitter::address_operand;
use crate::error::SemanticError;
use crate::symtab::ItemKind;
use crate::walker::Walker;

/// Entry point called from `Walker::reduce`. Wraps `apply_inner` to stamp
/// every node's `gen_code_start`/`gen_code_end` from the code emitted by
/// its children plus whatever this reduction itself emitted — so callers
/// never have to thread code spans through by hand.
pub fn apply(
    walker: &mut Walker<'_>,
    production_index: usize,
    children: Vec<AstNode>,
) -> Result<AstNode, SemanticError> {
    let entry_len = walker.emitter.len();
    let child_start = children
        .iter()
        .map(|c| c.gen_code_start)
        .filter(|v| *v != NO_CODE)
        .min();
    let child_end = children
        .iter()
        .map(|c| c.gen_code_end)
        .filter(|v| *v != NO_CODE)
        .max();

    let mut node = apply_inner(walker, production_index, children)?;

    let exit_len = walker.emitter.len();
    let self_emitted = exit_len != entry_len;

    node.gen_code_start = match (child_start, self_emitted) {
        (Some(start), _) => start,
        (None, true) => entry_len,
        (None, false) => NO_CODE,
    };
    node.gen_code_end = match (child_end, self_emitted) {
        (Some(end), true) => end.max(exit_len),
        (Some(end), false) => end,
        (None, true) => exit_len,
        (None, false) => NO_CODE,
    };

    Ok(node)
}

fn apply_inner(
    walker: &mut Walker<'_>,
    production_index: usize,
    mut children: Vec<AstNode>,
) -> Result<AstNode, SemanticError> {
    match production_index {
        // program → block
        0 => {
            walker.emitter.emit("exit", "0", Vec::new());
            Ok(AstNode::new("program", "program").with_children(children))
        }

        // block → { decls stmts } | { decls } | { stmts } | { }
        1 | 2 | 3 | 4 => Ok(AstNode::new("block", "block").with_children(children)),

        // decls → decls decl | ε
        5 => Ok(AstNode::new("decls", "decls").with_children(children)),
        6 => Ok(AstNode::new("", "decls")),

        // decl → type id ;
        7 => decl_rule(walker, &children),

        // type → type [ num ] | basic
        8 => array_type_rule(children),
        9 => Ok(AstNode::new(children.remove(0).text, "type")),

        // stmts → stmts stmt | ε
        10 => Ok(AstNode::new("stmts", "stmts").with_children(children)),
        11 => Ok(AstNode::new("", "stmts")),

        // stmt → matched_stmt | unmatched_stmt | decls
        12 | 13 | 14 => Ok(children.remove(0)),

        // unmatched_stmt → if ( bool ) unmatched_stmt
        15 => if_single_branch(walker, children),
        // unmatched_stmt → if ( bool ) matched_stmt else unmatched_stmt
        16 => if_else_branch(walker, children),

        // matched_stmt → loc = bool ;
        17 => assign_rule(walker, children),
        // matched_stmt → if ( bool ) matched_stmt else matched_stmt
        18 => if_else_branch(walker, children),
        // matched_stmt → if ( bool ) matched_stmt
        19 => if_single_branch(walker, children),
        // matched_stmt → while ( bool ) stmt
        20 => while_rule(walker, children),
        // matched_stmt → do stmt while ( bool ) ;
        21 => do_while_rule(walker, children),
        // matched_stmt → break ;
        22 => {
            walker.emitter.add_break_label();
            Ok(AstNode::new("break", "stmt"))
        }
        // matched_stmt → block
        23 => Ok(children.remove(0)),

        // loc → loc [ num ] | id
        24 => array_access_rule(walker, children),
        25 => identifier_loc_rule(walker, children),

        // bool → bool'
        26 => bool_rule(walker, children),

        // bool' → bool' || join | join
        27 => Ok(binary_op(walker, "or", &children[0], &children[2], "bool")),
        28 => Ok(children.remove(0)),

        // join → join && equality | equality
        29 => Ok(binary_op(walker, "and", &children[0], &children[2], "bool")),
        30 => Ok(children.remove(0)),

        // equality → equality == rel | equality != rel | rel
        31 => Ok(binary_op(walker, "eq", &children[0], &children[2], "bool")),
        32 => Ok(binary_op(walker, "ne", &children[0], &children[2], "bool")),
        33 => Ok(children.remove(0)),

        // rel → expr < expr | expr <= expr | expr >= expr | expr > expr | expr
        34 => Ok(binary_op(walker, "ls", &children[0], &children[2], "bool")),
        35 => Ok(binary_op(walker, "le", &children[0], &children[2], "bool")),
        36 => Ok(binary_op(walker, "ge", &children[0], &children[2], "bool")),
        37 => Ok(binary_op(walker, "gt", &children[0], &children[2], "bool")),
        38 => Ok(children.remove(0)),

        // expr → expr + term | expr - term | term
        39 => Ok(binary_op(walker, "add", &children[0], &children[2], "num")),
        40 => Ok(binary_op(walker, "sub", &children[0], &children[2], "num")),
        41 => Ok(children.remove(0)),

        // term → term * unary | term / unary | unary
        42 => Ok(binary_op(walker, "mul", &children[0], &children[2], "num")),
        43 => Ok(binary_op(walker, "div", &children[0], &children[2], "num")),
        44 => Ok(children.remove(0)),

        // unary → ! unary | - unary | factor
        45 => Ok(unary_op(walker, "not", &children[1], "bool")),
        46 => Ok(unary_op(walker, "neg", &children[1], "num")),
        47 => Ok(children.remove(0)),

        // factor → ( bool ) | loc | num | real | true | false
        48 => Ok(children.remove(1)),
        49 => Ok(children.remove(0)),
        50 => Ok(AstNode::new(children.remove(0).text, "num")),
        51 => Ok(AstNode::new(children.remove(0).text, "real")),
        52 => Ok(AstNode::new("1", "bool")),
        53 => Ok(AstNode::new("0", "bool")),

        other => unreachable!("production index {other} is out of range for the 54-rule grammar"),
    }
}

fn basic_alloc_size(type_name: &str) -> i64 {
    match basic_type_subtype(type_name).map(|s| s.alloc_size()) {
        Some(size) if size > 0 => size,
        // `string` is unsized in the basic-type table; this language never
        // indexes into one, so a pointer-sized word is a safe stand-in.
        _ => 4,
    }
}

fn initial_value_for(type_name: &str) -> &'static str {
    use TokenSubtype::*;
    match basic_type_subtype(type_name) {
        Some(TypeFloat) | Some(TypeFloat32) => "0.0f",
        Some(TypeFloat64) => "0.0",
        Some(TypeString) => "<nullptr>",
        Some(_) => "0",
        None => "<nullptr>",
    }
}

fn decl_rule(walker: &mut Walker<'_>, children: &[AstNode]) -> Result<AstNode, SemanticError> {
    let type_node = &children[0];
    let name = children[1].text.clone();

    let address = match &type_node.payload {
        Payload::ArrayType { base_type, dimensions } => {
            let elem_size = basic_alloc_size(base_type);
            let address =
                walker
                    .symtab
                    .register_array(&name, base_type, elem_size, dimensions.clone())?;
            let total_size: i64 = elem_size * dimensions.iter().product::<i64>();
            walker.emitter.emit(
                "alloc",
                address_operand(address),
                vec![total_size.to_string(), "<nullptr>".to_string()],
            );
            address
        }
        Payload::None => {
            let type_name = type_node.text.clone();
            let size = basic_alloc_size(&type_name);
            let address = walker.symtab.register_variable(&name, &type_name, size)?;
            let init = initial_value_for(&type_name);
            walker.emitter.emit(
                "alloc",
                address_operand(address),
                vec![size.to_string(), init.to_string()],
            );
            address
        }
        Payload::ArrayAccess { .. } => unreachable!("a `type` node never carries ArrayAccess"),
    };

    Ok(AstNode::new(address_operand(address), "decl"))
}

fn array_type_rule(mut children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let num_text = children[2].text.clone();
    let dim_value: i64 = num_text.parse().unwrap_or(1);
    let base = children.remove(0);
    let (base_type, mut dimensions) = match base.payload {
        Payload::ArrayType { base_type, dimensions } => (base_type, dimensions),
        _ => (base.text, Vec::new()),
    };
    dimensions.push(dim_value);
    Ok(AstNode::new(base_type.clone(), "type").with_payload(Payload::ArrayType {
        base_type,
        dimensions,
    }))
}

/// Builds a scratch temporary, emits `op dst left right`, and returns a
/// node referencing the temporary's address.
fn binary_op(walker: &mut Walker<'_>, op: &str, left: &AstNode, right: &AstNode, tag: &str) -> AstNode {
    let address = walker.symtab.alloc_temp(4);
    let dst = address_operand(address);
    walker
        .emitter
        .emit(op, dst.clone(), vec![left.text.clone(), right.text.clone()]);
    AstNode::new(dst, tag)
}

fn unary_op(walker: &mut Walker<'_>, op: &str, operand: &AstNode, tag: &str) -> AstNode {
    let address = walker.symtab.alloc_temp(4);
    let dst = address_operand(address);
    walker.emitter.emit(op, dst.clone(), vec![operand.text.clone()]);
    AstNode::new(dst, tag)
}

fn identifier_loc_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let name = children[0].text.clone();
    let item = walker
        .symtab
        .lookup(&name)
        .ok_or_else(|| SemanticError::Undeclared { name: name.clone() })?;

    let mut node = AstNode::new(address_operand(item.address), item.type_name.clone());
    if item.kind == ItemKind::Array {
        node = node.with_payload(Payload::ArrayAccess {
            name,
            indices: Vec::new(),
        });
    }
    Ok(node)
}

fn array_access_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let loc_node = &children[0];
    let (name, mut indices) = match &loc_node.payload {
        Payload::ArrayAccess { name, indices } => (name.clone(), indices.clone()),
        // The grammar only reaches here through an `id` that resolved to
        // an array; anything else is a walker bug, not a user error.
        _ => return Ok(loc_node.clone()),
    };

    let index: i64 = children[2].text.parse().unwrap_or(0);
    indices.push(index);

    let item = walker
        .symtab
        .lookup(&name)
        .ok_or_else(|| SemanticError::Undeclared { name: name.clone() })?
        .clone();

    if indices.len() == item.dimensions.len() {
        let offset = walker.symtab.array_offset(&item, &indices)?;
        let elem_size = item.elem_size.unwrap_or(4);
        let words_per_elem = (elem_size + 3) / 4;
        let address = item.address + (offset * words_per_elem) as u64;
        Ok(AstNode::new(address_operand(address), item.type_name.clone()))
    } else {
        Ok(AstNode::new(loc_node.text.clone(), item.type_name.clone())
            .with_payload(Payload::ArrayAccess { name, indices }))
    }
}

fn assign_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let dst = children[0].text.clone();
    let src = children[2].text.clone();
    walker.emitter.emit("mov", dst, vec![src]);
    Ok(AstNode::new("assign", "stmt"))
}

/// `bool → bool'`: decides, via the debug symbol stack, what kind of
/// condition this is and reserves the backpatchable labels accordingly.
///
/// - plain assignment RHS (`loc = bool ;`): no labels, the value just
///   flows through as `children[0]`.
/// - `do … while ( bool )`: the loop-entry jump was already reserved when
///   `do` was shifted (see `Walker::next`); only the comparison is emitted
///   here, no extra labels.
/// - genuine `if ( bool )` / `while ( bool )`: two labels are reserved —
///   a conditional jump finalised immediately (`jnz temp, L<skip+1>`, i.e.
///   "fall straight into the body on true") and a placeholder unconditional
///   jump patched later by the enclosing statement rule once it knows
///   where the body ends.
fn bool_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let inner = children.into_iter().next().expect("bool always has one child");

    // `loc = bool ;`: the symbol directly below the about-to-be-reduced
    // `bool` is `=`.
    if walker.peek_symbol_back(1) == Some("=") {
        return Ok(inner);
    }

    let address = walker.symtab.alloc_temp(4);
    let temp = address_operand(address);
    walker
        .emitter
        .emit("cmp", temp.clone(), vec![inner.text.clone(), "0".to_string()]);

    // `do stmt while ( bool )`: four symbols back from `bool` is `do`.
    let is_do_while = walker.peek_symbol_back(4) == Some("do");
    if is_do_while {
        return Ok(AstNode::new(temp, "bool"));
    }

    let cond_label = walker.emitter.new_label();
    let skip_label = walker.emitter.new_goto_label();
    walker
        .emitter
        .emit_label(cond_label, "jnz", format!("L{}", skip_label + 1), vec![temp.clone()]);

    // two symbols back from `bool` is `while` for a genuine while-loop.
    if walker.peek_symbol_back(2) == Some("while") {
        walker.emitter.enter_loop();
        walker.emitter.loop_label_stack.push(walker.emitter.len());
    }

    Ok(AstNode::new(temp, "bool"))
}

fn if_single_branch(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let skip_label = walker
        .emitter
        .endif_stack
        .pop()
        .expect("if reserves a placeholder jump via bool_rule");
    walker.emitter.label_stack.pop();

    let end_index = walker.emitter.len();
    walker
        .emitter
        .emit_label(skip_label, "jmp", format!("L{end_index}"), vec![]);

    Ok(AstNode::new("if", "stmt").with_children(children))
}

fn if_else_branch(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let skip_label = walker
        .emitter
        .endif_stack
        .pop()
        .expect("if/else reserves a placeholder jump via bool_rule");
    walker.emitter.label_stack.pop();

    // The then-branch is children[4]; its own gen_code_end is exactly the
    // point where the else-branch's code begins.
    let then_branch = &children[4];
    let else_start = if then_branch.gen_code_end == NO_CODE {
        walker.emitter.len()
    } else {
        then_branch.gen_code_end
    };
    walker
        .emitter
        .emit_label(skip_label, "jmp", format!("L{else_start}"), vec![]);

    Ok(AstNode::new("if_else", "stmt").with_children(children))
}

fn while_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let skip_label = walker
        .emitter
        .endif_stack
        .pop()
        .expect("while reserves a placeholder jump via bool_rule");
    walker.emitter.label_stack.pop();

    let back_edge = walker
        .emitter
        .loop_label_stack
        .pop()
        .expect("while_rule pairs with the loop_label_stack push in bool_rule");
    walker.emitter.emit("jmp", format!("L{back_edge}"), vec![]);

    let end_index = walker.emitter.len();
    walker
        .emitter
        .emit_label(skip_label, "jmp", format!("L{end_index}"), vec![]);
    walker.emitter.exit_loop(end_index);

    Ok(AstNode::new("while", "stmt").with_children(children))
}

fn do_while_rule(walker: &mut Walker<'_>, children: Vec<AstNode>) -> Result<AstNode, SemanticError> {
    let body = &children[1];
    let cond = &children[4];

    let loop_start = if body.gen_code_start == NO_CODE {
        walker.emitter.len()
    } else {
        body.gen_code_start
    };
    walker
        .emitter
        .emit("jnz", format!("L{loop_start}"), vec![cond.text.clone()]);

    let end_index = walker.emitter.len();
    walker.emitter.exit_loop(end_index);

    Ok(AstNode::new("do_while", "stmt").with_children(children))
}
