use std::str::FromStr;

use crate::dialects::DatabaseDialect;

/// Direction of a stored-function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    In,
    Out,
    InOut,
}

impl ParamDirection {
    pub fn to_sql(self, dialect: &dyn DatabaseDialect) -> &str {
        match self {
            ParamDirection::In => "IN",
            ParamDirection::Out => "OUT",
            ParamDirection::InOut => dialect.inout_keyword(),
        }
    }
}

impl FromStr for ParamDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IN" => Ok(ParamDirection::In),
            "OUT" => Ok(ParamDirection::Out),
            "INOUT" | "IN OUT" | "IN_OUT" => Ok(ParamDirection::InOut),
            other => Err(format!("unknown parameter direction '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub direction: ParamDirection,
    pub name: String,
    pub data_type: String,
}

/// Parameter signature and return type of a stored function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDefinition {
    return_type: Option<String>,
    params: Vec<Param>,
}

impl ParamDefinition {
    pub fn new(return_type: Option<String>) -> Self {
        Self {
            return_type,
            params: Vec::new(),
        }
    }

    pub fn param(
        &mut self,
        direction: ParamDirection,
        name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> &mut Self {
        self.params.push(Param {
            direction,
            name: name.into(),
            data_type: data_type.into(),
        });
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// `(IN a NUMBER, OUT b VARCHAR2) RETURN NUMBER`.
    ///
    /// Parentheses are dropped for an empty parameter list and the return
    /// clause is dropped when no return type was given.
    pub fn to_sql(&self, dialect: &dyn DatabaseDialect) -> String {
        let mut sql = String::new();

        if !self.params.is_empty() {
            let rendered: Vec<String> = self
                .params
                .iter()
                .map(|p| format!("{} {} {}", p.direction.to_sql(dialect), p.name, p.data_type))
                .collect();
            sql.push('(');
            sql.push_str(&rendered.join(", "));
            sql.push(')');
        }

        if let Some(return_type) = &self.return_type {
            sql.push(' ');
            sql.push_str(dialect.function_return_keyword());
            sql.push(' ');
            sql.push_str(return_type);
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::oracle::OracleDialect;
    use crate::dialects::postgres::PostgresDialect;

    #[test]
    fn test_params_render_in_insertion_order() {
        let mut params = ParamDefinition::new(Some("NUMBER".to_string()));
        params
            .param(ParamDirection::In, "p_id", "NUMBER")
            .param(ParamDirection::Out, "p_name", "VARCHAR2")
            .param(ParamDirection::InOut, "p_count", "NUMBER");

        assert_eq!(
            params.to_sql(&OracleDialect::new()),
            "(IN p_id NUMBER, OUT p_name VARCHAR2, IN OUT p_count NUMBER) RETURN NUMBER"
        );
    }

    #[test]
    fn test_no_return_type_means_no_return_clause() {
        let mut params = ParamDefinition::new(None);
        params.param(ParamDirection::In, "p_id", "NUMBER");

        assert_eq!(params.to_sql(&OracleDialect::new()), "(IN p_id NUMBER)");
    }

    #[test]
    fn test_empty_param_list_omits_parentheses() {
        let params = ParamDefinition::new(Some("DATE".to_string()));
        assert_eq!(params.to_sql(&OracleDialect::new()), " RETURN DATE");
        assert_eq!(ParamDefinition::new(None).to_sql(&OracleDialect::new()), "");
    }

    #[test]
    fn test_postgres_keywords() {
        let mut params = ParamDefinition::new(Some("integer".to_string()));
        params.param(ParamDirection::InOut, "total", "integer");

        assert_eq!(
            params.to_sql(&PostgresDialect::new()),
            "(INOUT total integer) RETURNS integer"
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("in".parse::<ParamDirection>().unwrap(), ParamDirection::In);
        assert_eq!("IN OUT".parse::<ParamDirection>().unwrap(), ParamDirection::InOut);
        assert_eq!("inout".parse::<ParamDirection>().unwrap(), ParamDirection::InOut);
        assert!("sideways".parse::<ParamDirection>().is_err());
    }
}
