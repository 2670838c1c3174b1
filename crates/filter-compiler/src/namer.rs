/// Generates collision-free bound-parameter names for one compile call.
///
/// Names look like `arg_t_name_3`: a token derived from the resolved field
/// expression plus a counter scoped to this namer. Each top-level compile
/// owns its own namer, so concurrent compiles never contend and names stay
/// origin-local.
#[derive(Debug, Default)]
pub struct ParamNamer {
    counter: usize,
}

impl ParamNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, field_expr: &str) -> String {
        self.counter += 1;
        format!("arg_{}_{}", sanitize(field_expr), self.counter)
    }
}

/// Reduces a field expression to an identifier-safe token.
fn sanitize(expr: &str) -> String {
    expr.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
