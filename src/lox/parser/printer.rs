//! Parenthesized prefix rendering of expression trees
//!
//! Produces an unambiguous text form that depends only on tree shape:
//!
//! ```text
//! -123 * (45.67)   =>   (* (- 123) (group 45.67))
//! ```

use super::ast::Expr;

/// Render an expression as `(op left right)`-style text
pub fn render(expr: &Expr) -> String {
    let mut output = String::new();
    render_into(expr, &mut output);
    output
}

fn render_into(expr: &Expr, output: &mut String) {
    match expr {
        Expr::Binary {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()], output),
        Expr::Grouping { expression } => parenthesize("group", &[expression.as_ref()], output),
        Expr::Literal { value } => output.push_str(&value.to_string()),
        Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[right.as_ref()], output),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr], output: &mut String) {
    output.push('(');
    output.push_str(name);
    for expr in exprs {
        output.push(' ');
        render_into(expr, output);
    }
    output.push(')');
}
