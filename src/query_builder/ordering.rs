/// Sort direction for order terms
#[derive(Debug, Clone)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_groq(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Render an order term like `"name asc"` for
    /// [`crate::query_builder::Query::set_order`].
    pub fn term(&self, field: &str) -> String {
        format!("{} {}", field, self.to_groq())
    }
}
