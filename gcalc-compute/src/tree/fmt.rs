//! Infix text rendering of expression trees.
//!
//! The output is meant for people, but is also valid calculator input: parsing the text of a
//! tree gives back a tree that evaluates to the same value.

use crate::complex::Complex;
use super::{Expr, Leaf, Op};

/// How tightly a rendered expression binds. An operand is wrapped in parentheses if it binds
/// less tightly than its surroundings require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Sum,
    Product,
    Power,
    Atom,
}

fn level(expr: &Expr) -> Level {
    match expr {
        Expr::Leaf(Leaf::Number(c)) => {
            let c = normalize(*c);
            if c.re != 0.0 && c.im != 0.0 || c.re < 0.0 || c.im < 0.0 {
                Level::Sum
            } else {
                Level::Atom
            }
        },
        Expr::Leaf(_) => Level::Atom,
        Expr::Call(Op::Add | Op::Subtract, _) => Level::Sum,
        Expr::Call(Op::Multiply | Op::Divide, _) => Level::Product,
        Expr::Call(Op::Pow | Op::Fac | Op::Exp, _) => Level::Power,
        Expr::Call(..) | Expr::Unknown(..) => Level::Atom,
    }
}

/// Replaces `-0` with `0`.
fn normalize(c: Complex) -> Complex {
    let part = |x: f64| if x == 0.0 { 0.0 } else { x };
    Complex::new(part(c.re), part(c.im))
}

/// Renders a complex number as `a + bi`, rounding both parts to `precision` digits.
pub fn display_complex(c: Complex, precision: i32) -> String {
    if c.is_nan() {
        return "NaN".to_string();
    }

    let c = normalize(c.round(precision));
    let imaginary = |im: f64| {
        if im == 1.0 {
            "i".to_string()
        } else if im == -1.0 {
            "-i".to_string()
        } else if im.is_finite() {
            format!("{}i", im)
        } else {
            format!("{}*i", im)
        }
    };

    match (c.re, c.im) {
        (re, im) if im == 0.0 => format!("{}", re),
        (re, im) if re == 0.0 => imaginary(im),
        (re, im) if im < 0.0 => format!("{} - {}", re, imaginary(-im)),
        (re, im) => format!("{} + {}", re, imaginary(im)),
    }
}

/// Renders `expr`, wrapping it in parentheses if it binds less tightly than `min`.
fn operand(expr: &Expr, min: Level, precision: i32) -> String {
    let text = display(expr, precision);
    if level(expr) < min {
        format!("({})", text)
    } else {
        text
    }
}

/// If `expr` is a negated term, such as `-1 * x`, `-2x` or `-3`, returns the term without its
/// sign.
fn negated(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Leaf(Leaf::Number(c)) if c.is_real() && c.re < 0.0 => Some(Expr::number(-c.re)),
        Expr::Call(Op::Multiply, factors) => {
            let coefficient = factors.first()?.as_number()?;
            if !coefficient.is_real() || coefficient.re >= 0.0 {
                return None;
            }

            let mut rest = factors[1..].to_vec();
            if coefficient.re != -1.0 {
                rest.insert(0, Expr::number(-coefficient.re));
            }
            Some(match rest.len() {
                0 => Expr::number(1.0),
                1 => rest.remove(0),
                _ => Expr::Call(Op::Multiply, rest),
            })
        },
        _ => None,
    }
}

/// Returns true if two rendered factors must be joined with an explicit `*`.
fn needs_star(prev: &str, next: &str) -> bool {
    let (Some(last), Some(first)) = (prev.chars().last(), next.chars().next()) else {
        return false;
    };
    first.is_ascii_digit()
        || first == '-'
        || first == '.'
        || last.is_ascii_alphabetic() && first.is_ascii_alphabetic()
}

fn display_product(factors: &[Expr], precision: i32) -> String {
    let mut out = String::new();
    for (i, factor) in factors.iter().enumerate() {
        let text = if i == 0 && level(factor) == Level::Sum && negated(factor).is_some() {
            display(factor, precision)
        } else {
            operand(factor, Level::Product, precision)
        };
        if needs_star(&out, &text) {
            out.push('*');
        }
        out.push_str(&text);
    }
    out
}

fn display_call(name: &str, args: &[Expr], precision: i32) -> String {
    let args = args.iter().map(|arg| display(arg, precision)).collect::<Vec<_>>();
    format!("{}({})", name, args.join(", "))
}

/// Renders `expr` as infix text, rounding literals to `precision` digits.
pub fn display(expr: &Expr, precision: i32) -> String {
    match expr {
        Expr::Leaf(Leaf::Number(c)) => display_complex(*c, precision),
        Expr::Leaf(Leaf::Constant(constant)) => constant.name().to_string(),
        Expr::Leaf(Leaf::Variable(name)) => name.clone(),
        Expr::Leaf(Leaf::Empty) => String::new(),
        Expr::Call(Op::Add, terms) => {
            let mut out = String::new();
            for (i, term) in terms.iter().enumerate() {
                match negated(term) {
                    Some(positive) if i > 0 => {
                        out.push_str(" - ");
                        out.push_str(&operand(&positive, Level::Product, precision));
                    },
                    _ => {
                        if i > 0 {
                            out.push_str(" + ");
                        }
                        out.push_str(&display(term, precision));
                    },
                }
            }
            out
        },
        Expr::Call(Op::Subtract, args) if args.len() == 2 => {
            let rhs = operand(&args[1], Level::Product, precision);
            if args[0].is_literal(0.0) {
                format!("-{}", rhs)
            } else {
                format!("{} - {}", display(&args[0], precision), rhs)
            }
        },
        Expr::Call(Op::Multiply, factors) => match negated(expr) {
            Some(positive) if factors.first().is_some_and(|c| c.is_literal(-1.0)) => {
                format!("-{}", operand(&positive, Level::Product, precision))
            },
            _ => display_product(factors, precision),
        },
        Expr::Call(Op::Divide, args) if args.len() == 2 => {
            let numerator = match negated(&args[0]) {
                Some(_) if level(&args[0]) == Level::Sum => display(&args[0], precision),
                _ => operand(&args[0], Level::Product, precision),
            };
            format!("{}/{}", numerator, operand(&args[1], Level::Power, precision))
        },
        Expr::Call(Op::Pow, args) if args.len() == 2 => format!(
            "{}^{}",
            operand(&args[0], Level::Atom, precision),
            operand(&args[1], Level::Atom, precision),
        ),
        Expr::Call(Op::Exp, args) if args.len() == 1 => {
            format!("e^{}", operand(&args[0], Level::Atom, precision))
        },
        Expr::Call(Op::Fac, args) if args.len() == 1 => {
            format!("{}!", operand(&args[0], Level::Atom, precision))
        },
        Expr::Call(op, args) => display_call(op.name(), args, precision),
        Expr::Unknown(name, args) => display_call(name, args, precision),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Binding;
    use gcalc_parser::parse;
    use pretty_assertions::assert_eq;

    fn tree(canonical: &str) -> Expr {
        canonical.parse().unwrap()
    }

    #[test]
    fn complex_numbers() {
        assert_eq!(display_complex(Complex::real(14.0), 12), "14");
        assert_eq!(display_complex(Complex::new(0.0, 1.0), 12), "i");
        assert_eq!(display_complex(Complex::new(0.0, -2.0), 12), "-2i");
        assert_eq!(display_complex(Complex::new(1.5, -1.0), 12), "1.5 - i");
        assert_eq!(display_complex(Complex::new(3.0, 4.0), 12), "3 + 4i");
        assert_eq!(display_complex(Complex::INFINITY, 12), "inf");
        assert_eq!(display_complex(Complex::NAN, 12), "NaN");
        assert_eq!(display_complex(Complex::real(0.1 + 0.2), 12), "0.3");
    }

    #[test]
    fn juxtaposition() {
        assert_eq!(display(&tree("multiply([2,0],x)"), 12), "2x");
        assert_eq!(display(&tree("multiply(x,[2,0])"), 12), "x*2");
        assert_eq!(display(&tree("multiply(x,y)"), 12), "x*y");
        assert_eq!(display(&tree("multiply([2,0],sin(x))"), 12), "2sin(x)");
        assert_eq!(display(&tree("multiply(add(x,[1,0]),subtract(x,[1,0]))"), 12), "(x + 1)(x - 1)");
    }

    #[test]
    fn signs() {
        assert_eq!(
            display(&tree("add(pow(cos(x),[2,0]),multiply([-1,0],pow(sin(x),[2,0])))"), 12),
            "cos(x)^2 - sin(x)^2",
        );
        assert_eq!(display(&tree("divide([-1,0],pow(x,[2,0]))"), 12), "-1/x^2");
        assert_eq!(display(&tree("multiply([-1,0],x)"), 12), "-x");
        assert_eq!(display(&tree("add(x,[-3,0])"), 12), "x - 3");
        assert_eq!(display(&tree("subtract([0,0],add(x,[1,0]))"), 12), "-(x + 1)");
    }

    #[test]
    fn powers() {
        assert_eq!(display(&tree("pow(add(x,[1,0]),[2,0])"), 12), "(x + 1)^2");
        assert_eq!(display(&tree("pow(x,[-1,0])"), 12), "x^(-1)");
        assert_eq!(display(&tree("exp(multiply([2,0],x))"), 12), "e^(2x)");
        assert_eq!(display(&tree("fac([3,0])"), 12), "3!");
    }

    #[test]
    fn text_reparses() {
        for canonical in [
            "add(pow(cos(x),[2,0]),multiply([-1,0],pow(sin(x),[2,0])))",
            "divide([-1,0],pow(x,[2,0]))",
            "multiply([3,0],pow(x,[2,0]),sin(x))",
            "divide(add(x,[1,0]),multiply([2,0],x))",
        ] {
            let expr = tree(canonical);
            let text = display(&expr, 12);
            let reparsed = Expr::create_tree(&parse(&text).unwrap());
            let at = |e: &Expr| e.evaluate(Some(&Binding::new("x", 0.7)), Default::default())
                .unwrap()
                .as_number()
                .unwrap();
            assert!((at(&expr) - at(&reparsed)).re.abs() < 1e-12, "{canonical} -> {text}");
        }
    }
}
