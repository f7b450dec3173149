//! Expression parsing, evaluation and differentiation
//!
//! Model formulas and least-squares objectives are represented as expression
//! trees. A tree can be parsed from text, evaluated against a context,
//! rewritten by substituting values for variables, differentiated
//! symbolically, and finally read back as an affine combination of a set of
//! symbols. The symbolic normal-equation solver is built from these pieces.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::recognize,
    multi::many0,
    number::complete::double,
    sequence::pair,
    IResult, Parser,
};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error that can occur during expression parsing, evaluation or differentiation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Failed to parse expression: {message}")]
    ParseError { message: String },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("Function {name}() cannot be differentiated")]
    NotDifferentiable { name: String },

    #[error("Expression is not affine in its symbols: {message}")]
    NotAffine { message: String },
}

/// Result type for expression operations
type ExprResult<T> = Result<T, ExpressionError>;

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant number
    Number(f64),

    /// Variable reference
    Variable(String),

    /// Unary operations
    Unary(UnaryOp, Box<Expression>),

    /// Binary operations
    Binary(BinaryOp, Box<Expression>, Box<Expression>),

    /// Function call
    Function(String, Vec<Expression>),
}

/// Unary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
}

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    /// Addition (+)
    Add,

    /// Subtraction (-)
    Sub,

    /// Multiplication (*)
    Mul,

    /// Division (/)
    Div,

    /// Power (^)
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> ExprResult<f64> {
        match self {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Sub => Ok(lhs - rhs),
            BinaryOp::Mul => Ok(lhs * rhs),
            BinaryOp::Div => {
                if rhs == 0.0 {
                    Err(ExpressionError::DivisionByZero)
                } else {
                    Ok(lhs / rhs)
                }
            }
            BinaryOp::Pow => Ok(lhs.powf(rhs)),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => " + ",
            BinaryOp::Sub => " - ",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

/// Apply a named function to already evaluated arguments.
///
/// Only the functions model formulas and their derivatives produce are known:
/// `sin`, `cos` and `ln`.
fn apply_function(name: &str, args: &[f64]) -> ExprResult<f64> {
    let unary: fn(f64) -> f64 = match name {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "ln" => f64::ln,
        _ => {
            return Err(ExpressionError::UndefinedFunction {
                name: name.to_string(),
            })
        }
    };

    if args.len() != 1 {
        return Err(ExpressionError::InvalidOperation {
            message: format!("{}() requires 1 argument, got {}", name, args.len()),
        });
    }
    Ok(unary(args[0]))
}

/// Context for expression evaluation, providing variable values
pub trait EvaluationContext {
    /// Get the value of a variable
    fn get_variable(&self, name: &str) -> ExprResult<f64>;

    /// Check if a variable exists
    fn has_variable(&self, name: &str) -> bool;

    /// Get the names of all variables
    fn variable_names(&self) -> Vec<String>;
}

/// Simple implementation of EvaluationContext using a HashMap
#[derive(Debug, Clone, Default)]
pub struct SimpleContext {
    /// Map of variable names to values
    variables: HashMap<String, f64>,
}

impl SimpleContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Set a variable value
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }
}

impl EvaluationContext for SimpleContext {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }
}

/// An expression of the form `constant + Σ terms[i] * symbols[i]`.
///
/// Produced by [`Expression::affine_form`]. The `terms` vector is indexed like
/// the symbol slice passed to that call.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineForm {
    /// Part of the expression that multiplies no symbol
    pub constant: f64,

    /// Factor multiplying each symbol
    pub terms: Vec<f64>,
}

impl AffineForm {
    fn constant(value: f64, symbols: usize) -> Self {
        Self {
            constant: value,
            terms: vec![0.0; symbols],
        }
    }

    /// Whether no symbol appears with a non-zero factor.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|t| *t == 0.0)
    }

    fn scale(mut self, factor: f64) -> Self {
        self.constant *= factor;
        for t in self.terms.iter_mut() {
            *t *= factor;
        }
        self
    }

    fn combine(mut self, other: &AffineForm, sign: f64) -> Self {
        self.constant += sign * other.constant;
        for (t, o) in self.terms.iter_mut().zip(other.terms.iter()) {
            *t += sign * o;
        }
        self
    }
}

impl Expression {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> ExprResult<Self> {
        match expr_parser(input.trim()) {
            Ok((remainder, expr)) => {
                // Make sure the entire input was consumed
                if remainder.trim().is_empty() {
                    Ok(expr)
                } else {
                    Err(ExpressionError::ParseError {
                        message: format!("Unexpected trailing characters: '{}'", remainder),
                    })
                }
            }
            Err(e) => Err(ExpressionError::ParseError {
                message: format!("{:?}", e),
            }),
        }
    }

    /// Build a binary node
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Build a single-argument function call
    pub fn call(name: &str, arg: Expression) -> Self {
        Self::Function(name.to_string(), vec![arg])
    }

    /// Sum a list of terms as a balanced tree.
    ///
    /// Keeping the tree shallow lets objectives over many samples be walked
    /// recursively. Returns `None` for an empty list.
    pub fn sum(mut terms: Vec<Expression>) -> Option<Self> {
        while terms.len() > 1 {
            let mut next = Vec::with_capacity((terms.len() + 1) / 2);
            let mut iter = terms.into_iter();
            while let Some(left) = iter.next() {
                match iter.next() {
                    Some(right) => next.push(Self::binary(BinaryOp::Add, left, right)),
                    None => next.push(left),
                }
            }
            terms = next;
        }
        terms.pop()
    }

    /// The value of a `Number` node
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Evaluate the expression with the given context
    pub fn evaluate<C: EvaluationContext>(&self, context: &C) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),

            Self::Variable(name) => context.get_variable(name),

            Self::Unary(op, expr) => {
                let value = expr.evaluate(context)?;
                match op {
                    UnaryOp::Neg => Ok(-value),
                }
            }

            Self::Binary(op, left, right) => {
                let lhs = left.evaluate(context)?;
                let rhs = right.evaluate(context)?;
                op.apply(lhs, rhs)
            }

            Self::Function(name, args) => {
                let evaluated_args = args
                    .iter()
                    .map(|arg| arg.evaluate(context))
                    .collect::<ExprResult<Vec<f64>>>()?;
                apply_function(name, &evaluated_args)
            }
        }
    }

    /// Find all variable names used in the expression
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    /// Recursively collect all variable names used in the expression
    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}

            Self::Variable(name) => {
                vars.push(name.clone());
            }

            Self::Unary(_, expr) => {
                expr.collect_variables(vars);
            }

            Self::Binary(_, left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }

            Self::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Whether the variable `name` occurs anywhere in the expression
    pub fn depends_on(&self, name: &str) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Variable(var) => var == name,
            Self::Unary(_, expr) => expr.depends_on(name),
            Self::Binary(_, left, right) => left.depends_on(name) || right.depends_on(name),
            Self::Function(_, args) => args.iter().any(|arg| arg.depends_on(name)),
        }
    }

    /// Replace every occurrence of the variable `name` with a constant
    pub fn substitute(&self, name: &str, value: f64) -> Expression {
        match self {
            Self::Variable(var) if var == name => Self::Number(value),
            Self::Number(_) | Self::Variable(_) => self.clone(),
            Self::Unary(op, expr) => Self::Unary(*op, Box::new(expr.substitute(name, value))),
            Self::Binary(op, left, right) => Self::Binary(
                *op,
                Box::new(left.substitute(name, value)),
                Box::new(right.substitute(name, value)),
            ),
            Self::Function(func, args) => Self::Function(
                func.clone(),
                args.iter().map(|arg| arg.substitute(name, value)).collect(),
            ),
        }
    }

    /// Fold constant subtrees and drop neutral elements.
    ///
    /// The result evaluates to the same value as `self` wherever both are
    /// finite.
    pub fn simplify(&self) -> Expression {
        match self {
            Self::Number(_) | Self::Variable(_) => self.clone(),

            Self::Unary(UnaryOp::Neg, expr) => match expr.simplify() {
                Self::Number(n) => Self::Number(-n),
                Self::Unary(UnaryOp::Neg, inner) => *inner,
                other => Self::Unary(UnaryOp::Neg, Box::new(other)),
            },

            Self::Binary(op, left, right) => simplify_binary(*op, left.simplify(), right.simplify()),

            Self::Function(name, args) => {
                let args: Vec<Expression> = args.iter().map(Expression::simplify).collect();
                let constants = args.iter().map(Expression::as_number).collect::<Option<Vec<f64>>>();
                if let Some(values) = constants {
                    if let Ok(value) = apply_function(name, &values) {
                        return Self::Number(value);
                    }
                }
                Self::Function(name.clone(), args)
            }
        }
    }

    /// Symbolic partial derivative with respect to `var`, simplified.
    pub fn derivative(&self, var: &str) -> ExprResult<Expression> {
        Ok(self.differentiate(var)?.simplify())
    }

    fn differentiate(&self, var: &str) -> ExprResult<Expression> {
        use BinaryOp::*;

        let expr = match self {
            Self::Number(_) => Self::Number(0.0),

            Self::Variable(name) => Self::Number(if name == var { 1.0 } else { 0.0 }),

            Self::Unary(UnaryOp::Neg, expr) => {
                Self::Unary(UnaryOp::Neg, Box::new(expr.differentiate(var)?))
            }

            Self::Binary(op, left, right) => {
                let u = left.as_ref();
                let w = right.as_ref();
                let du = u.differentiate(var)?;
                match op {
                    Add | Sub => Self::binary(*op, du, w.differentiate(var)?),
                    Mul => Self::binary(
                        Add,
                        Self::binary(Mul, du, w.clone()),
                        Self::binary(Mul, u.clone(), w.differentiate(var)?),
                    ),
                    Div => Self::binary(
                        Div,
                        Self::binary(
                            Sub,
                            Self::binary(Mul, du, w.clone()),
                            Self::binary(Mul, u.clone(), w.differentiate(var)?),
                        ),
                        Self::binary(Pow, w.clone(), Self::Number(2.0)),
                    ),
                    Pow if !w.depends_on(var) => {
                        // d(u^c) = c * u^(c-1) * du
                        let lowered = Self::binary(Sub, w.clone(), Self::Number(1.0));
                        Self::binary(
                            Mul,
                            Self::binary(Mul, w.clone(), Self::binary(Pow, u.clone(), lowered)),
                            du,
                        )
                    }
                    Pow => {
                        // d(u^w) = u^w * (dw * ln(u) + w * du / u)
                        let dw = w.differentiate(var)?;
                        Self::binary(
                            Mul,
                            self.clone(),
                            Self::binary(
                                Add,
                                Self::binary(Mul, dw, Self::call("ln", u.clone())),
                                Self::binary(Div, Self::binary(Mul, w.clone(), du), u.clone()),
                            ),
                        )
                    }
                }
            }

            Self::Function(name, args) => {
                if args.len() != 1 {
                    return Err(ExpressionError::NotDifferentiable { name: name.clone() });
                }
                let u = &args[0];
                let outer = match name.as_str() {
                    "sin" => Self::call("cos", u.clone()),
                    "cos" => Self::Unary(UnaryOp::Neg, Box::new(Self::call("sin", u.clone()))),
                    "ln" => Self::binary(Div, Self::Number(1.0), u.clone()),
                    _ => return Err(ExpressionError::NotDifferentiable { name: name.clone() }),
                };
                Self::binary(Mul, outer, u.differentiate(var)?)
            }
        };

        Ok(expr)
    }

    /// Read the expression as `constant + Σ terms[i] * symbols[i]`.
    ///
    /// Every variable must be one of `symbols`. Fails with
    /// [`ExpressionError::NotAffine`] when a symbol is multiplied by another
    /// symbol, divided into, raised to a power other than 0 or 1, used as an
    /// exponent, or passed to a function.
    pub fn affine_form(&self, symbols: &[String]) -> ExprResult<AffineForm> {
        let k = symbols.len();
        match self {
            Self::Number(n) => Ok(AffineForm::constant(*n, k)),

            Self::Variable(name) => match symbols.iter().position(|s| s == name) {
                Some(index) => {
                    let mut form = AffineForm::constant(0.0, k);
                    form.terms[index] = 1.0;
                    Ok(form)
                }
                None => Err(ExpressionError::UndefinedVariable { name: name.clone() }),
            },

            Self::Unary(UnaryOp::Neg, expr) => Ok(expr.affine_form(symbols)?.scale(-1.0)),

            Self::Binary(op, left, right) => {
                let lhs = left.affine_form(symbols)?;
                let rhs = right.affine_form(symbols)?;
                match op {
                    BinaryOp::Add => Ok(lhs.combine(&rhs, 1.0)),
                    BinaryOp::Sub => Ok(lhs.combine(&rhs, -1.0)),
                    BinaryOp::Mul => {
                        if lhs.is_constant() {
                            Ok(rhs.scale(lhs.constant))
                        } else if rhs.is_constant() {
                            Ok(lhs.scale(rhs.constant))
                        } else {
                            Err(ExpressionError::NotAffine {
                                message: "product of two symbol-dependent factors".to_string(),
                            })
                        }
                    }
                    BinaryOp::Div => {
                        if !rhs.is_constant() {
                            return Err(ExpressionError::NotAffine {
                                message: "division by a symbol-dependent expression".to_string(),
                            });
                        }
                        if rhs.constant == 0.0 {
                            return Err(ExpressionError::DivisionByZero);
                        }
                        Ok(lhs.scale(1.0 / rhs.constant))
                    }
                    BinaryOp::Pow => {
                        if !rhs.is_constant() {
                            return Err(ExpressionError::NotAffine {
                                message: format!("symbol in an exponent: {}", right),
                            });
                        }
                        let exponent = rhs.constant;
                        if lhs.is_constant() {
                            Ok(AffineForm::constant(lhs.constant.powf(exponent), k))
                        } else if exponent == 1.0 {
                            Ok(lhs)
                        } else if exponent == 0.0 {
                            Ok(AffineForm::constant(1.0, k))
                        } else {
                            Err(ExpressionError::NotAffine {
                                message: format!("symbol-dependent base raised to {}", exponent),
                            })
                        }
                    }
                }
            }

            Self::Function(name, args) => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    let form = arg.affine_form(symbols)?;
                    if !form.is_constant() {
                        return Err(ExpressionError::NotAffine {
                            message: format!("{}() of a symbol-dependent argument", name),
                        });
                    }
                    values.push(form.constant);
                }
                Ok(AffineForm::constant(apply_function(name, &values)?, k))
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary(BinaryOp::Add | BinaryOp::Sub, _, _) => 1,
            Self::Binary(BinaryOp::Mul | BinaryOp::Div, _, _) => 2,
            Self::Unary(..) => 3,
            Self::Binary(BinaryOp::Pow, _, _) => 4,
            Self::Number(_) | Self::Variable(_) | Self::Function(..) => 5,
        }
    }

    fn write_with(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        let wrap = self.precedence() < min_precedence;
        if wrap {
            write!(f, "(")?;
        }

        match self {
            Self::Number(n) if *n < 0.0 => write!(f, "({})", n)?,
            Self::Number(n) => write!(f, "{}", n)?,
            Self::Variable(name) => write!(f, "{}", name)?,
            Self::Unary(UnaryOp::Neg, expr) => {
                write!(f, "-")?;
                expr.write_with(f, 3)?;
            }
            Self::Binary(op, left, right) => {
                // Left-associative operators need the right operand wrapped at equal
                // precedence; `^` is right-associative and takes a signed exponent.
                let (left_min, right_min) = match op {
                    BinaryOp::Add => (1, 1),
                    BinaryOp::Sub => (1, 2),
                    BinaryOp::Mul => (2, 2),
                    BinaryOp::Div => (2, 3),
                    BinaryOp::Pow => (5, 3),
                };
                left.write_with(f, left_min)?;
                write!(f, "{}", op.symbol())?;
                right.write_with(f, right_min)?;
            }
            Self::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.write_with(f, 0)?;
                }
                write!(f, ")")?;
            }
        }

        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn simplify_binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    let is = |e: &Expression, v: f64| e.as_number() == Some(v);

    if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
        if let Ok(value) = op.apply(a, b) {
            return Expression::Number(value);
        }
    }

    match op {
        BinaryOp::Add if is(&left, 0.0) => right,
        BinaryOp::Add if is(&right, 0.0) => left,
        BinaryOp::Sub if is(&right, 0.0) => left,
        BinaryOp::Sub if is(&left, 0.0) => Expression::Unary(UnaryOp::Neg, Box::new(right)),
        BinaryOp::Mul if is(&left, 0.0) || is(&right, 0.0) => Expression::Number(0.0),
        BinaryOp::Mul if is(&left, 1.0) => right,
        BinaryOp::Mul if is(&right, 1.0) => left,
        BinaryOp::Div if is(&right, 1.0) => left,
        BinaryOp::Div if is(&left, 0.0) => Expression::Number(0.0),
        BinaryOp::Pow if is(&right, 1.0) => left,
        BinaryOp::Pow if is(&right, 0.0) => Expression::Number(1.0),
        _ => Expression::binary(op, left, right),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, 0)
    }
}

// Parser functions using nom

fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

/// Consume a single operator character
fn op_char(input: &str, c: char) -> IResult<&str, char> {
    char(c).parse(input)
}

/// Parse an identifier (variable or function name)
fn identifier(input: &str) -> IResult<&str, String> {
    let mut parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));

    let (input, matched) = parser.parse(input)?;
    Ok((input, matched.to_string()))
}

/// Parse a comma-separated list of expressions (for function arguments)
fn args_list(input: &str) -> IResult<&str, Vec<Expression>> {
    let (mut input, first) = expr_parser(input)?;
    let mut args = vec![first];

    loop {
        let (rest, _) = ws(input)?;
        match op_char(rest, ',') {
            Ok((after_comma, _)) => {
                let (after_expr, expr) = expr_parser(after_comma)?;
                args.push(expr);
                input = after_expr;
            }
            Err(_) => return Ok((input, args)),
        }
    }
}

/// Parse a function call
fn function_call(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = op_char(input, '(')?;
    let (input, _) = ws(input)?;

    // Handle empty arguments case
    if let Ok((input, _)) = op_char(input, ')') {
        return Ok((input, Expression::Function(name, vec![])));
    }

    let (input, args) = args_list(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = op_char(input, ')')?;

    Ok((input, Expression::Function(name, args)))
}

/// Parse a number
fn number(input: &str) -> IResult<&str, Expression> {
    let (input, num) = double(input)?;
    Ok((input, Expression::Number(num)))
}

/// Parse a variable reference
fn variable(input: &str) -> IResult<&str, Expression> {
    let (input, var_name) = identifier(input)?;
    Ok((input, Expression::Variable(var_name)))
}

/// Parse a parenthesized expression
fn parens(input: &str) -> IResult<&str, Expression> {
    let (input, _) = op_char(input, '(')?;
    let (input, expr) = expr_parser(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = op_char(input, ')')?;
    Ok((input, expr))
}

/// Parse a primary expression (number, variable, function call, or parenthesized expression)
fn primary(input: &str) -> IResult<&str, Expression> {
    if let Ok(result) = number(input) {
        return Ok(result);
    }

    if let Ok(result) = function_call(input) {
        return Ok(result);
    }

    if let Ok(result) = variable(input) {
        return Ok(result);
    }

    parens(input)
}

/// Parse a power expression (primary ^ unary), right-associative
fn power(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary(input)?;
    let (after_ws, _) = ws(input)?;

    match op_char(after_ws, '^') {
        Ok((after_op, _)) => {
            let (remaining, exponent) = unary(after_op)?;
            Ok((
                remaining,
                Expression::binary(BinaryOp::Pow, base, exponent),
            ))
        }
        Err(_) => Ok((input, base)),
    }
}

/// Parse a unary expression (-expr)
fn unary(input: &str) -> IResult<&str, Expression> {
    let (input, _) = ws(input)?;

    match op_char(input, '-') {
        Ok((remaining, _)) => {
            let (remaining, expr) = unary(remaining)?;
            Ok((remaining, Expression::Unary(UnaryOp::Neg, Box::new(expr))))
        }
        Err(_) => power(input),
    }
}

/// Parse a multiplicative expression (expr * expr, expr / expr), left-associative
fn term(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut acc) = unary(input)?;

    loop {
        let (rest, _) = ws(input)?;
        let op = if let Ok((after_op, _)) = op_char(rest, '*') {
            (after_op, BinaryOp::Mul)
        } else if let Ok((after_op, _)) = op_char(rest, '/') {
            (after_op, BinaryOp::Div)
        } else {
            return Ok((input, acc));
        };

        let (remaining, right) = unary(op.0)?;
        acc = Expression::binary(op.1, acc, right);
        input = remaining;
    }
}

/// Parse an additive expression (expr + expr, expr - expr), left-associative
fn expr_parser(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut acc) = term(input)?;

    loop {
        let (rest, _) = ws(input)?;
        let op = if let Ok((after_op, _)) = op_char(rest, '+') {
            (after_op, BinaryOp::Add)
        } else if let Ok((after_op, _)) = op_char(rest, '-') {
            (after_op, BinaryOp::Sub)
        } else {
            return Ok((input, acc));
        };

        let (remaining, right) = term(op.0)?;
        acc = Expression::binary(op.1, acc, right);
        input = remaining;
    }
}
