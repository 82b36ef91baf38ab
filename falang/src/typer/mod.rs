//! Static type checker.
//!
//! Walks the AST bottom-up, recording a `Type` for every statement,
//! expression and lambda in a [`TypeMap`], resolving operator overloads into
//! an [`OpMap`], and mutating the global [`TypeEnv`] on `let`. Lambdas are
//! the only place names appear mid-expression: the checker of `map`/`filter`
//! computes the element type of the driving collection and passes it down to
//! the lambda visit, which destructures the pattern against it in a fresh
//! scope.

use std::collections::{BTreeMap, HashMap};

use falang_parser::ast::{
    Expr, ExprKind, Lambda, LoadSource, NodeId, Pattern, PatternKind, Program, Stmt, StmtKind,
    Val, ValKind,
};

use crate::error::TypeError;
use crate::types::Type;

/// Types by AST node.
pub type TypeMap = HashMap<NodeId, Type>;

/// Resolved operator variants by AST node, so the evaluator never re-decides
/// an overload.
pub type OpMap = HashMap<NodeId, ResolvedOp>;

/// The overload a binary operator resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedOp {
    /// `++` on two strings
    StringConcat,
    /// `++` lifting to automaton concatenation
    FaConcat,
    /// `|` on two equal set types
    SetUnion,
    /// `|` lifting to language union
    FaUnion,
    /// `&` on two equal set types
    SetIntersect,
    /// `&` as the tensor product
    FaProduct,
}

/// Name → type bindings: a global map for `let`, plus a stack of lambda
/// scopes. Lambda parameters may shadow outer names for the body only.
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    globals: BTreeMap<String, Type>,
    scopes: Vec<HashMap<String, Type>>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.globals.get(name))
    }

    /// Insert a top-level binding; redeclaring is a type error.
    pub fn bind_global(&mut self, name: &str, ty: Type) -> Result<(), TypeError> {
        if self.globals.contains_key(name) {
            return Err(TypeError::AlreadyBound(name.to_string()));
        }
        self.globals.insert(name.to_string(), ty);
        Ok(())
    }

    /// Top-level bindings in name order (for the `--types` listing).
    pub fn globals(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.globals.iter()
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind into the innermost scope; a pattern may not bind one name twice.
    fn bind_local(&mut self, name: &str, ty: Type) -> Result<(), TypeError> {
        let scope = self
            .scopes
            .last_mut()
            .expect("bind_local outside any scope");
        if scope.contains_key(name) {
            return Err(TypeError::AlreadyBound(name.to_string()));
        }
        scope.insert(name.to_string(), ty);
        Ok(())
    }
}

/// The result of a successful check: annotations for the evaluator.
#[derive(Debug, Default)]
pub struct Checked {
    pub types: TypeMap,
    pub ops: OpMap,
}

/// The checker itself. Borrows the environment so a REPL session can keep it
/// across programs.
#[derive(Debug)]
pub struct Typer<'e> {
    env: &'e mut TypeEnv,
    types: TypeMap,
    ops: OpMap,
}

impl<'e> Typer<'e> {
    pub fn new(env: &'e mut TypeEnv) -> Self {
        Self {
            env,
            types: TypeMap::new(),
            ops: OpMap::new(),
        }
    }

    pub fn check_program(mut self, program: &Program) -> Result<Checked, TypeError> {
        for stmt in &program.stmts {
            self.check_stmt(stmt)?;
        }
        Ok(Checked {
            types: self.types,
            ops: self.ops,
        })
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), TypeError> {
        match &stmt.kind {
            StmtKind::Bind { pattern, value } => {
                let ty = self.check_expr(value)?;
                self.bind_pattern(pattern, &ty, false)?;
            }
            StmtKind::Print { value } => {
                self.check_expr(value)?;
            }
        }
        self.types.insert(stmt.id, Type::None);
        Ok(())
    }

    /// **PatBind**: a name binds any type; a tuple pattern of arity k binds
    /// only a tuple type of the same arity, component-wise.
    fn bind_pattern(&mut self, pattern: &Pattern, ty: &Type, local: bool) -> Result<(), TypeError> {
        match &pattern.kind {
            PatternKind::Name(name) => {
                if local {
                    self.env.bind_local(name, ty.clone())
                } else {
                    self.env.bind_global(name, ty.clone())
                }
            }
            PatternKind::Tuple(parts) => match ty {
                Type::Tuple(items) => {
                    if parts.len() != items.len() {
                        return Err(TypeError::PatternArity {
                            pattern: pattern.to_string(),
                            found: ty.clone(),
                        });
                    }
                    for (part, item) in parts.iter().zip(items) {
                        self.bind_pattern(part, item, local)?;
                    }
                    Ok(())
                }
                _ => Err(TypeError::PatternShape {
                    pattern: pattern.to_string(),
                    found: ty.clone(),
                }),
            },
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<Type, TypeError> {
        let ty = match &expr.kind {
            ExprKind::Var(name) => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| TypeError::UndefinedVariable(name.clone()))?,

            ExprKind::Val(val) => self.check_val(val)?,

            ExprKind::Load(source) => {
                if let LoadSource::Var(name) = source {
                    let ty = self
                        .env
                        .lookup(name)
                        .cloned()
                        .ok_or_else(|| TypeError::UndefinedVariable(name.clone()))?;
                    if ty != Type::Str {
                        return Err(TypeError::BadLoadSource);
                    }
                }
                Type::fa_int()
            }

            ExprKind::GetStarts(fa) => Type::set_of(self.expect_fa(fa, "get_starts")?),
            ExprKind::GetFinals(fa) => Type::set_of(self.expect_fa(fa, "get_finals")?),
            ExprKind::GetVertices(fa) => Type::set_of(self.expect_fa(fa, "get_vertices")?),
            ExprKind::GetLabels(fa) => {
                self.expect_fa(fa, "get_labels")?;
                Type::set_of(Type::Str)
            }
            ExprKind::GetEdges(fa) => {
                let vertex = self.expect_fa(fa, "get_edges")?;
                Type::set_of(Type::Tuple(vec![vertex.clone(), Type::Str, vertex]))
            }
            ExprKind::GetReachable(fa) => {
                let vertex = self.expect_fa(fa, "get_reachable")?;
                Type::set_of(Type::Tuple(vec![vertex.clone(), vertex]))
            }

            ExprKind::SetStarts { fa, states } => {
                let vertex = self.expect_fa(fa, "set_starts")?;
                self.expect_state_set(states, &vertex, "set_starts")?;
                Type::fa_of(vertex)
            }
            ExprKind::SetFinals { fa, states } => {
                let vertex = self.expect_fa(fa, "set_finals")?;
                self.expect_state_set(states, &vertex, "set_finals")?;
                Type::fa_of(vertex)
            }
            ExprKind::AddStarts { states, fa } => {
                let states_ty = self.check_expr(states)?;
                let vertex = self.expect_fa(fa, "add_starts")?;
                check_state_set(&states_ty, &vertex, "add_starts")?;
                Type::fa_of(vertex)
            }
            ExprKind::AddFinals { states, fa } => {
                let states_ty = self.check_expr(states)?;
                let vertex = self.expect_fa(fa, "add_finals")?;
                check_state_set(&states_ty, &vertex, "add_finals")?;
                Type::fa_of(vertex)
            }

            ExprKind::Union { lhs, rhs } => {
                self.check_binary(expr.id, lhs, rhs, "union", resolve_union)?
            }
            ExprKind::Concat { lhs, rhs } => {
                self.check_binary(expr.id, lhs, rhs, "concat", resolve_concat)?
            }
            ExprKind::Product { lhs, rhs } => {
                self.check_binary(expr.id, lhs, rhs, "product", resolve_product)?
            }

            ExprKind::Kleene(inner) => {
                let ty = self.check_expr(inner)?;
                if !matches!(ty, Type::Fa(_)) {
                    return Err(TypeError::KleeneOnNonFa(ty));
                }
                ty
            }

            ExprKind::In { item, collection } => {
                let item_ty = self.check_expr(item)?;
                let collection_ty = self.check_expr(collection)?;
                let element = match &collection_ty {
                    Type::Set(element) => (**element).clone(),
                    Type::Tuple(items) => {
                        if !collection_ty.is_uniform_tuple() {
                            return Err(TypeError::NonUniformTuple(collection_ty.clone()));
                        }
                        items[0].clone()
                    }
                    _ => return Err(TypeError::BadMembershipSource(collection_ty.clone())),
                };
                if element != item_ty {
                    return Err(TypeError::MembershipMismatch {
                        item: item_ty,
                        collection: collection_ty,
                    });
                }
                Type::Bool
            }

            ExprKind::Map { over, lambda } => {
                let element = self.driving_element_type(over)?;
                let ret = self.check_lambda(lambda, &element)?;
                Type::set_of(ret)
            }
            ExprKind::Filter { over, lambda } => {
                let element = self.driving_element_type(over)?;
                let ret = self.check_lambda(lambda, &element)?;
                if ret != Type::Bool {
                    return Err(TypeError::NotAPredicate(ret));
                }
                Type::set_of(element)
            }

            ExprKind::Braced(inner) => self.check_expr(inner)?,
        };

        self.types.insert(expr.id, ty.clone());
        Ok(ty)
    }

    fn check_val(&mut self, val: &Val) -> Result<Type, TypeError> {
        match &val.kind {
            ValKind::Int(_) => Ok(Type::Int),
            ValKind::Str(_) => Ok(Type::Str),
            ValKind::IntSet(_) => Ok(Type::set_of(Type::Int)),
            ValKind::Tuple(items) => {
                let mut types = Vec::with_capacity(items.len());
                for item in items {
                    types.push(self.check_val(item)?);
                }
                Ok(Type::Tuple(types))
            }
            ValKind::Var(name) => Err(TypeError::VarInTupleLiteral(name.clone())),
        }
    }

    fn expect_fa(&mut self, expr: &Expr, operation: &'static str) -> Result<Type, TypeError> {
        match self.check_expr(expr)? {
            Type::Fa(vertex) => Ok(*vertex),
            found => Err(TypeError::ExpectedFa { operation, found }),
        }
    }

    fn expect_state_set(
        &mut self,
        states: &Expr,
        vertex: &Type,
        operation: &'static str,
    ) -> Result<(), TypeError> {
        let found = self.check_expr(states)?;
        check_state_set(&found, vertex, operation)
    }

    fn check_binary(
        &mut self,
        id: NodeId,
        lhs: &Expr,
        rhs: &Expr,
        operation: &'static str,
        resolve: fn(&Type, &Type) -> Option<(Type, ResolvedOp)>,
    ) -> Result<Type, TypeError> {
        let lhs_ty = self.check_expr(lhs)?;
        let rhs_ty = self.check_expr(rhs)?;
        let (ty, op) = resolve(&lhs_ty, &rhs_ty).ok_or(TypeError::BadOperands {
            operation,
            lhs: lhs_ty,
            rhs: rhs_ty,
        })?;
        self.ops.insert(id, op);
        Ok(ty)
    }

    /// Element type of the collection driving a `map`/`filter`.
    fn driving_element_type(&mut self, over: &Expr) -> Result<Type, TypeError> {
        let ty = self.check_expr(over)?;
        match &ty {
            Type::Set(element) => Ok((**element).clone()),
            Type::Tuple(items) => {
                if ty.is_uniform_tuple() {
                    Ok(items[0].clone())
                } else {
                    Err(TypeError::NonUniformTuple(ty.clone()))
                }
            }
            _ => Err(TypeError::BadLambdaSource(ty.clone())),
        }
    }

    /// Destructure the pattern against the element type in a fresh scope,
    /// check the body, and record the lambda's type.
    fn check_lambda(&mut self, lambda: &Lambda, element: &Type) -> Result<Type, TypeError> {
        self.env.push_scope();
        let result = self
            .bind_pattern(&lambda.pattern, element, true)
            .and_then(|_| self.check_expr(&lambda.body));
        self.env.pop_scope();
        let ret = result?;

        self.types.insert(
            lambda.id,
            Type::Lambda {
                param: Box::new(element.clone()),
                ret: Box::new(ret.clone()),
            },
        );
        Ok(ret)
    }
}

fn check_state_set(found: &Type, vertex: &Type, operation: &'static str) -> Result<(), TypeError> {
    let expected = Type::set_of(vertex.clone());
    if *found != expected {
        return Err(TypeError::Mismatch {
            operation,
            expected,
            found: found.clone(),
        });
    }
    Ok(())
}

fn is_language(ty: &Type) -> bool {
    *ty == Type::Str || *ty == Type::fa_int()
}

fn resolve_union(lhs: &Type, rhs: &Type) -> Option<(Type, ResolvedOp)> {
    if let (Type::Set(a), Type::Set(b)) = (lhs, rhs) {
        if a == b {
            return Some((lhs.clone(), ResolvedOp::SetUnion));
        }
    }
    if is_language(lhs) && is_language(rhs) {
        return Some((Type::fa_int(), ResolvedOp::FaUnion));
    }
    None
}

fn resolve_concat(lhs: &Type, rhs: &Type) -> Option<(Type, ResolvedOp)> {
    if *lhs == Type::Str && *rhs == Type::Str {
        return Some((Type::Str, ResolvedOp::StringConcat));
    }
    if is_language(lhs) && is_language(rhs) {
        return Some((Type::fa_int(), ResolvedOp::FaConcat));
    }
    None
}

fn resolve_product(lhs: &Type, rhs: &Type) -> Option<(Type, ResolvedOp)> {
    if let (Type::Set(a), Type::Set(b)) = (lhs, rhs) {
        if a == b {
            return Some((lhs.clone(), ResolvedOp::SetIntersect));
        }
    }
    if let (Type::Fa(a), Type::Fa(b)) = (lhs, rhs) {
        let pair = Type::Tuple(vec![(**a).clone(), (**b).clone()]);
        return Some((Type::fa_of(pair), ResolvedOp::FaProduct));
    }
    // one string, one integer automaton: both are lifted
    if is_language(lhs) && is_language(rhs) && lhs != rhs {
        let pair = Type::Tuple(vec![Type::Int, Type::Int]);
        return Some((Type::fa_of(pair), ResolvedOp::FaProduct));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use falang_parser::parse;

    fn check(source: &str) -> Result<(TypeEnv, Checked), TypeError> {
        let program = parse(source).expect("test source must parse");
        let mut env = TypeEnv::new();
        let checked = Typer::new(&mut env).check_program(&program)?;
        Ok((env, checked))
    }

    fn global_type(source: &str, name: &str) -> Type {
        let (env, _) = check(source).expect("program must type-check");
        env.lookup(name).cloned().expect("binding must exist")
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(global_type("let a = 5;", "a"), Type::Int);
        assert_eq!(global_type("let a = \"x\";", "a"), Type::Str);
        assert_eq!(global_type("let a = {1, 2};", "a"), Type::set_of(Type::Int));
        assert_eq!(global_type("let a = {};", "a"), Type::set_of(Type::Int));
        assert_eq!(
            global_type("let a = [1, \"x\"];", "a"),
            Type::Tuple(vec![Type::Int, Type::Str])
        );
    }

    #[test]
    fn test_double_bind() {
        assert_eq!(
            check("let a = 1; let a = 2;").unwrap_err(),
            TypeError::AlreadyBound("a".to_string())
        );
    }

    #[test]
    fn test_undefined_variable() {
        assert_eq!(
            check("print x;").unwrap_err(),
            TypeError::UndefinedVariable("x".to_string())
        );
    }

    #[test]
    fn test_variable_in_tuple_literal() {
        assert_eq!(
            check("let a = 5; let t = [1, 2, a];").unwrap_err(),
            TypeError::VarInTupleLiteral("a".to_string())
        );
    }

    #[test]
    fn test_tuple_pattern_bind() {
        let (env, _) = check("let [a, [b, c]] = [1, [\"x\", {1}]];").unwrap();
        assert_eq!(env.lookup("a"), Some(&Type::Int));
        assert_eq!(env.lookup("b"), Some(&Type::Str));
        assert_eq!(env.lookup("c"), Some(&Type::set_of(Type::Int)));
    }

    #[test]
    fn test_tuple_pattern_arity_mismatch() {
        assert!(matches!(
            check("let [a, b] = [1, 2, 3];").unwrap_err(),
            TypeError::PatternArity { .. }
        ));
    }

    #[test]
    fn test_pattern_against_non_tuple() {
        assert!(matches!(
            check("let [a, b] = 5;").unwrap_err(),
            TypeError::PatternShape { .. }
        ));
    }

    #[test]
    fn test_union_overloads() {
        assert_eq!(global_type("let a = \"x\" | \"y\";", "a"), Type::fa_int());
        assert_eq!(
            global_type("let a = {1} | {2};", "a"),
            Type::set_of(Type::Int)
        );
        assert!(matches!(
            check("let a = 1 | 2;").unwrap_err(),
            TypeError::BadOperands { operation: "union", .. }
        ));
    }

    #[test]
    fn test_concat_overloads() {
        assert_eq!(global_type("let a = \"x\" ++ \"y\";", "a"), Type::Str);
        assert_eq!(
            global_type("let fa = \"x\" | \"y\"; let a = fa ++ \"z\";", "a"),
            Type::fa_int()
        );
        assert!(matches!(
            check("let a = {1} ++ {2};").unwrap_err(),
            TypeError::BadOperands { .. }
        ));
    }

    #[test]
    fn test_product_overloads() {
        assert_eq!(
            global_type("let a = {1} & {2};", "a"),
            Type::set_of(Type::Int)
        );
        // mixed string/automaton widens to pair vertices
        assert_eq!(
            global_type("let fa = \"x\" | \"y\"; let a = fa & \"x\";", "a"),
            Type::fa_of(Type::Tuple(vec![Type::Int, Type::Int]))
        );
        // two automata pair their vertex types
        assert_eq!(
            global_type(
                "let fa = \"x\" | \"y\"; let p = fa & fa; let a = p & fa;",
                "a"
            ),
            Type::fa_of(Type::Tuple(vec![
                Type::Tuple(vec![Type::Int, Type::Int]),
                Type::Int
            ]))
        );
        // string & string stays invalid
        assert!(matches!(
            check("let a = \"x\" & \"x\";").unwrap_err(),
            TypeError::BadOperands { .. }
        ));
    }

    #[test]
    fn test_kleene() {
        assert_eq!(
            global_type("let fa = \"x\" | \"y\"; let a = fa *;", "a"),
            Type::fa_int()
        );
        assert!(matches!(
            check("let a = 5 *;").unwrap_err(),
            TypeError::KleeneOnNonFa(Type::Int)
        ));
    }

    #[test]
    fn test_extractor_types() {
        let source = "let fa = \"x\" | \"y\";";
        assert_eq!(
            global_type(&format!("{source} let a = get_starts of fa;"), "a"),
            Type::set_of(Type::Int)
        );
        assert_eq!(
            global_type(&format!("{source} let a = get_labels of fa;"), "a"),
            Type::set_of(Type::Str)
        );
        assert_eq!(
            global_type(&format!("{source} let a = get_edges of fa;"), "a"),
            Type::set_of(Type::Tuple(vec![Type::Int, Type::Str, Type::Int]))
        );
        assert_eq!(
            global_type(&format!("{source} let a = get_reachable of fa;"), "a"),
            Type::set_of(Type::Tuple(vec![Type::Int, Type::Int]))
        );
    }

    #[test]
    fn test_extractor_on_non_fa() {
        assert!(matches!(
            check("print get_starts of {1};").unwrap_err(),
            TypeError::ExpectedFa { operation: "get_starts", .. }
        ));
    }

    #[test]
    fn test_state_updates() {
        let source = "let fa = \"x\" | \"y\";";
        assert_eq!(
            global_type(
                &format!("{source} let a = set_starts of fa to {{1, 2}};"),
                "a"
            ),
            Type::fa_int()
        );
        // a string set is not a valid vertex set for an int automaton
        assert!(matches!(
            check(&format!("{source} print set_starts of fa to get_labels of fa;")).unwrap_err(),
            TypeError::Mismatch { operation: "set_starts", .. }
        ));
        // neither is a tuple
        assert!(matches!(
            check(&format!("{source} print add_starts [1, 2] to fa;")).unwrap_err(),
            TypeError::Mismatch { operation: "add_starts", .. }
        ));
    }

    #[test]
    fn test_load_types() {
        assert_eq!(global_type("let g = load \"g.dot\";", "g"), Type::fa_int());
        assert_eq!(
            global_type("let p = \"g.dot\"; let g = load p;", "g"),
            Type::fa_int()
        );
        assert_eq!(
            check("let p = 5; let g = load p;").unwrap_err(),
            TypeError::BadLoadSource
        );
    }

    #[test]
    fn test_membership() {
        let (_, checked) = check("let s = {1, 2}; print 1 in s;").unwrap();
        assert!(checked.types.values().any(|t| *t == Type::Bool));

        assert!(matches!(
            check("print \"x\" in {1};").unwrap_err(),
            TypeError::MembershipMismatch { .. }
        ));
        assert!(matches!(
            check("print 1 in [1, \"x\"];").unwrap_err(),
            TypeError::NonUniformTuple(_)
        ));
        assert!(matches!(
            check("print 1 in 2;").unwrap_err(),
            TypeError::BadMembershipSource(Type::Int)
        ));
    }

    #[test]
    fn test_map_and_filter_types() {
        assert_eq!(
            global_type("let a = map {1, 2} with \\x -> x in {1};", "a"),
            Type::set_of(Type::Bool)
        );
        assert_eq!(
            global_type("let a = filter {1, 2} with \\x -> x in {1};", "a"),
            Type::set_of(Type::Int)
        );
        // uniform tuples drive map/filter
        assert_eq!(
            global_type("let a = map [1, 2, 3] with \\x -> x;", "a"),
            Type::set_of(Type::Int)
        );
    }

    #[test]
    fn test_filter_requires_predicate() {
        assert_eq!(
            check("print filter {1} with \\x -> x;").unwrap_err(),
            TypeError::NotAPredicate(Type::Int)
        );
    }

    #[test]
    fn test_lambda_over_non_collection() {
        assert!(matches!(
            check("print map 5 with \\x -> x;").unwrap_err(),
            TypeError::BadLambdaSource(Type::Int)
        ));
        assert!(matches!(
            check("print map [1, \"x\"] with \\x -> x;").unwrap_err(),
            TypeError::NonUniformTuple(_)
        ));
    }

    #[test]
    fn test_lambda_tuple_pattern() {
        let source = "let fa = \"x\" | \"y\"; \
                      let a = map get_reachable of fa with \\[u, v] -> u;";
        assert_eq!(global_type(source, "a"), Type::set_of(Type::Int));
    }

    #[test]
    fn test_lambda_pattern_shape_mismatch() {
        assert!(matches!(
            check("print map {1} with \\[a, b] -> a;").unwrap_err(),
            TypeError::PatternShape { .. }
        ));
    }

    #[test]
    fn test_lambda_names_are_scoped() {
        // the parameter disappears after the lambda
        assert_eq!(
            check("let s = map {1} with \\x -> x; print x;").unwrap_err(),
            TypeError::UndefinedVariable("x".to_string())
        );
        // and may shadow a global inside the body
        let (env, _) = check("let x = \"s\"; let s = map {1} with \\x -> x;").unwrap();
        assert_eq!(env.lookup("x"), Some(&Type::Str));
        assert_eq!(env.lookup("s"), Some(&Type::set_of(Type::Int)));
    }

    #[test]
    fn test_lambda_type_recorded() {
        let program = parse("print map {1} with \\x -> x in {2};").unwrap();
        let mut env = TypeEnv::new();
        let checked = Typer::new(&mut env).check_program(&program).unwrap();
        assert!(checked.types.values().any(|t| matches!(
            t,
            Type::Lambda { param, ret }
                if **param == Type::Int && **ret == Type::Bool
        )));
    }

    #[test]
    fn test_operator_resolution_is_recorded() {
        let program = parse("print {1} | {2}; print \"a\" | \"b\";").unwrap();
        let mut env = TypeEnv::new();
        let checked = Typer::new(&mut env).check_program(&program).unwrap();
        let mut ops: Vec<ResolvedOp> = checked.ops.values().copied().collect();
        ops.sort_by_key(|op| format!("{op:?}"));
        assert_eq!(ops, vec![ResolvedOp::FaUnion, ResolvedOp::SetUnion]);
    }

    #[test]
    fn test_statements_type_as_none() {
        let program = parse("let a = 1;").unwrap();
        let stmt_id = program.stmts[0].id;
        let mut env = TypeEnv::new();
        let checked = Typer::new(&mut env).check_program(&program).unwrap();
        assert_eq!(checked.types.get(&stmt_id), Some(&Type::None));
    }
}
