use std::fmt;

use crate::dialects::base::FeatureConfig;

/// The two flavours of virtual table a dialect may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualTableKind {
    View,
    MaterializedView,
}

impl VirtualTableKind {
    /// SQL keyword used in CREATE/DROP statements.
    pub fn keyword(self) -> &'static str {
        match self {
            VirtualTableKind::View => "VIEW",
            VirtualTableKind::MaterializedView => "MATERIALIZED VIEW",
        }
    }

    /// Capability that gates statements for this kind.
    pub fn feature(self) -> Feature {
        match self {
            VirtualTableKind::View => Feature::Views,
            VirtualTableKind::MaterializedView => Feature::MaterializedViews,
        }
    }
}

impl fmt::Display for VirtualTableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A dialect capability that can turn an operation into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Views,
    MaterializedViews,
    Functions,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feature::Views => "views",
            Feature::MaterializedViews => "materialized views",
            Feature::Functions => "functions",
        };
        f.write_str(name)
    }
}

/// Per-call options for creating or dropping a view or materialized view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualTableOptions {
    /// Drop any existing object of the same name first, ignoring failures.
    pub force: bool,
    /// `CASCADED`, `LOCAL` or whatever the dialect accepts.
    pub check_option: Option<String>,
    /// `CASCADE`, `RESTRICT` or whatever the dialect accepts.
    pub drop_behavior: Option<String>,
}

impl VirtualTableOptions {
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }

    pub fn with_check_option(mut self, check_option: impl Into<String>) -> Self {
        self.check_option = Some(check_option.into());
        self
    }

    pub fn with_drop_behavior(mut self, drop_behavior: impl Into<String>) -> Self {
        self.drop_behavior = Some(drop_behavior.into());
        self
    }
}

/// Options for `create_function`. Without a return type no RETURN clause is
/// rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionOptions {
    pub return_type: Option<String>,
}

impl FunctionOptions {
    pub fn returning(return_type: impl Into<String>) -> Self {
        Self {
            return_type: Some(return_type.into()),
        }
    }
}

/// Capability set of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub views: bool,
    pub materialized_views: bool,
    pub functions: bool,
    pub view_columns_definition: bool,
}

impl Capabilities {
    pub fn from_features(features: &FeatureConfig) -> Self {
        Self {
            views: features.supports_views,
            materialized_views: features.supports_materialized_views,
            functions: features.supports_functions,
            view_columns_definition: features.supports_view_columns_definition,
        }
    }

    /// Everything enabled.
    pub fn all() -> Self {
        Self {
            views: true,
            materialized_views: true,
            functions: true,
            view_columns_definition: true,
        }
    }

    pub fn supports_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::Views => self.views,
            Feature::MaterializedViews => self.materialized_views,
            Feature::Functions => self.functions,
        }
    }

    pub fn supports(&self, kind: VirtualTableKind) -> bool {
        self.supports_feature(kind.feature())
    }

    pub fn supports_view_columns_definition(&self) -> bool {
        self.view_columns_definition
    }
}
