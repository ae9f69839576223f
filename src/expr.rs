//! Deferred arithmetic over the live screen size.
//!
//! Slate resolves geometry expressions such as `(screenSizeX - 375) / 6` at
//! the moment a hotkey fires, not when it is bound, so a rotated or resized
//! display is handled without re-binding anything.  [`Expr`] keeps that
//! property: the calculator builds expression trees once at startup, and a
//! host either renders them into its own syntax (via [`Display`](fmt::Display))
//! or evaluates them against a [`ScreenSize`] on demand.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Dimensions of the screen an expression is evaluated against, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An arithmetic expression over the screen dimensions.
///
/// Built with the ordinary `+ - * /` operators.  Two constant operands are
/// folded eagerly; everything else is kept as written so the rendered form
/// stays recognisable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    /// `screenSizeX`
    ScreenWidth,
    /// `screenSizeY`
    ScreenHeight,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    pub fn screen_width() -> Self {
        Expr::ScreenWidth
    }

    pub fn screen_height() -> Self {
        Expr::ScreenHeight
    }

    /// Evaluate against a concrete screen.
    ///
    /// Division by zero follows IEEE semantics (`inf` / `NaN`); layouts that
    /// could produce it are rejected when the layout is built.
    pub fn eval(&self, screen: ScreenSize) -> f64 {
        match self {
            Expr::Const(v) => *v,
            Expr::ScreenWidth => screen.width,
            Expr::ScreenHeight => screen.height,
            Expr::Add(a, b) => a.eval(screen) + b.eval(screen),
            Expr::Sub(a, b) => a.eval(screen) - b.eval(screen),
            Expr::Mul(a, b) => a.eval(screen) * b.eval(screen),
            Expr::Div(a, b) => a.eval(screen) / b.eval(screen),
        }
    }

    /// Binding strength: higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Const(_) | Expr::ScreenWidth | Expr::ScreenHeight => 3,
        }
    }

    fn binary(
        f: &mut fmt::Formatter<'_>,
        parent: u8,
        lhs: &Expr,
        op: &str,
        rhs: &Expr,
        non_associative: bool,
    ) -> fmt::Result {
        Self::operand(f, lhs, lhs.precedence() < parent)?;
        write!(f, " {} ", op)?;
        let p = rhs.precedence();
        Self::operand(f, rhs, p < parent || (non_associative && p == parent))
    }

    fn operand(f: &mut fmt::Formatter<'_>, e: &Expr, wrap: bool) -> fmt::Result {
        let negative = matches!(e, Expr::Const(v) if *v < 0.0);
        if wrap || negative {
            write!(f, "({})", e)
        } else {
            write!(f, "{}", e)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precedence();
        match self {
            Expr::Const(v) => write!(f, "{}", v),
            Expr::ScreenWidth => write!(f, "screenSizeX"),
            Expr::ScreenHeight => write!(f, "screenSizeY"),
            Expr::Add(a, b) => Self::binary(f, p, a, "+", b, false),
            Expr::Sub(a, b) => Self::binary(f, p, a, "-", b, true),
            Expr::Mul(a, b) => Self::binary(f, p, a, "*", b, false),
            Expr::Div(a, b) => Self::binary(f, p, a, "/", b, true),
        }
    }
}

/// Expressions serialise as the host's textual form.
impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

macro_rules! impl_op {
    ($trait:ident, $method:ident, $variant:ident, $fold:tt) => {
        impl $trait for Expr {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                match (self, rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a $fold b),
                    (a, b) => Expr::$variant(Box::new(a), Box::new(b)),
                }
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;
            fn $method(self, rhs: f64) -> Expr {
                self.$method(Expr::Const(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::Const(self).$method(rhs)
            }
        }
    };
}

impl_op!(Add, add, Add, +);
impl_op!(Sub, sub, Sub, -);
impl_op!(Mul, mul, Mul, *);
impl_op!(Div, div, Div, /);
