use crate::ddl::error::{DdlError, DdlOutcome};
use crate::ddl::kind::{Capabilities, Feature, FunctionOptions, VirtualTableKind, VirtualTableOptions};
use crate::ddl::mapping::MappingDefinition;
use crate::ddl::params::ParamDefinition;
use crate::ddl::view::ViewDefinition;
use crate::dialects::DatabaseDialect;
use crate::executor::SchemaConnection;
use log::{debug, info, warn};

/// Builds DDL for views, materialized views and functions and submits it to
/// a connection, skipping whatever the target's capabilities rule out.
///
/// Rendering is a pure function of its inputs; the `*_sql` methods can be
/// used on their own to preview statements.
pub struct DdlSynthesizer<'a, C: SchemaConnection + ?Sized> {
    dialect: &'a dyn DatabaseDialect,
    capabilities: Capabilities,
    connection: &'a mut C,
}

impl<'a, C: SchemaConnection + ?Sized> DdlSynthesizer<'a, C> {
    pub fn new(dialect: &'a dyn DatabaseDialect, connection: &'a mut C) -> Self {
        Self {
            dialect,
            capabilities: dialect.capabilities(),
            connection,
        }
    }

    /// Replace the capabilities taken from the dialect.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn dialect(&self) -> &dyn DatabaseDialect {
        self.dialect
    }

    pub fn create_view(
        &mut self,
        name: &str,
        select_query: &str,
        options: &VirtualTableOptions,
    ) -> Result<DdlOutcome, DdlError> {
        self.create_virtual_table(name, select_query, VirtualTableKind::View, options, |_| {})
    }

    pub fn create_view_with<F>(
        &mut self,
        name: &str,
        select_query: &str,
        options: &VirtualTableOptions,
        populate: F,
    ) -> Result<DdlOutcome, DdlError>
    where
        F: FnOnce(&mut ViewDefinition),
    {
        self.create_virtual_table(name, select_query, VirtualTableKind::View, options, populate)
    }

    pub fn create_materialized_view(
        &mut self,
        name: &str,
        select_query: &str,
        options: &VirtualTableOptions,
    ) -> Result<DdlOutcome, DdlError> {
        self.create_virtual_table(
            name,
            select_query,
            VirtualTableKind::MaterializedView,
            options,
            |_| {},
        )
    }

    pub fn create_materialized_view_with<F>(
        &mut self,
        name: &str,
        select_query: &str,
        options: &VirtualTableOptions,
        populate: F,
    ) -> Result<DdlOutcome, DdlError>
    where
        F: FnOnce(&mut ViewDefinition),
    {
        self.create_virtual_table(
            name,
            select_query,
            VirtualTableKind::MaterializedView,
            options,
            populate,
        )
    }

    /// Create a view or materialized view.
    ///
    /// With `options.force` an existing object is dropped first; that drop's
    /// failure is ignored. The CREATE's own failure is returned.
    pub fn create_virtual_table<F>(
        &mut self,
        name: &str,
        select_query: &str,
        kind: VirtualTableKind,
        options: &VirtualTableOptions,
        populate: F,
    ) -> Result<DdlOutcome, DdlError>
    where
        F: FnOnce(&mut ViewDefinition),
    {
        if !self.capabilities.supports(kind) {
            return Ok(self.skip(kind.feature(), name));
        }

        let mut view = ViewDefinition::new(select_query);
        populate(&mut view);

        if options.force {
            self.force_drop(name, kind);
        }

        let sql = self.create_virtual_table_sql(name, kind, &view, options);
        self.submit(sql)
    }

    /// Create a view over `old_name` that renames its columns.
    ///
    /// `populate` maps source columns to view columns and must only name
    /// columns that exist on `old_name`; an unknown column aborts before
    /// anything is submitted.
    pub fn create_mapping_view<F>(
        &mut self,
        old_name: &str,
        new_name: &str,
        options: &VirtualTableOptions,
        populate: F,
    ) -> Result<DdlOutcome, DdlError>
    where
        F: FnOnce(&mut MappingDefinition) -> Result<(), DdlError>,
    {
        if !self.capabilities.views {
            return Ok(self.skip(Feature::Views, new_name));
        }

        let columns = self
            .connection
            .columns(old_name)
            .map_err(|source| DdlError::Introspection {
                table: old_name.to_string(),
                source,
            })?;
        debug!("{} has {} columns", old_name, columns.len());

        let mut mapper = MappingDefinition::new(
            old_name,
            columns.into_iter().map(|c| c.name).collect(),
        );
        populate(&mut mapper)?;

        if options.force {
            self.force_drop(new_name, VirtualTableKind::View);
        }

        let sql = self.create_mapping_view_sql(new_name, &mapper);
        self.submit(sql)
    }

    pub fn drop_view(
        &mut self,
        name: &str,
        options: &VirtualTableOptions,
    ) -> Result<DdlOutcome, DdlError> {
        self.drop_virtual_table(name, VirtualTableKind::View, options)
    }

    pub fn drop_materialized_view(
        &mut self,
        name: &str,
        options: &VirtualTableOptions,
    ) -> Result<DdlOutcome, DdlError> {
        self.drop_virtual_table(name, VirtualTableKind::MaterializedView, options)
    }

    pub fn drop_virtual_table(
        &mut self,
        name: &str,
        kind: VirtualTableKind,
        options: &VirtualTableOptions,
    ) -> Result<DdlOutcome, DdlError> {
        if !self.capabilities.supports(kind) {
            return Ok(self.skip(kind.feature(), name));
        }

        let sql = self.drop_virtual_table_sql(name, kind, options);
        self.submit(sql)
    }

    /// Not capability gated.
    pub fn drop_table_cascade(&mut self, table_name: &str) -> Result<DdlOutcome, DdlError> {
        let sql = self.drop_table_cascade_sql(table_name);
        self.submit(sql)
    }

    pub fn create_function(
        &mut self,
        name: &str,
        function_definition: &str,
        options: &FunctionOptions,
    ) -> Result<DdlOutcome, DdlError> {
        self.create_function_with(name, function_definition, options, |_| {})
    }

    pub fn create_function_with<F>(
        &mut self,
        name: &str,
        function_definition: &str,
        options: &FunctionOptions,
        populate: F,
    ) -> Result<DdlOutcome, DdlError>
    where
        F: FnOnce(&mut ParamDefinition),
    {
        if !self.capabilities.functions {
            return Ok(self.skip(Feature::Functions, name));
        }

        let mut params = ParamDefinition::new(options.return_type.clone());
        populate(&mut params);

        let sql = self.create_function_sql(name, function_definition, &params);
        self.submit(sql)
    }

    /// `CREATE <kind> name [(cols)] AS query [WITH <opt> CHECK OPTION]`.
    /// The column list needs both dialect support and at least one column.
    pub fn create_virtual_table_sql(
        &self,
        name: &str,
        kind: VirtualTableKind,
        view: &ViewDefinition,
        options: &VirtualTableOptions,
    ) -> String {
        let mut sql = format!("CREATE {} {} ", kind.keyword(), self.dialect.quote_table_name(name));

        let column_list = view.to_sql(self.dialect);
        if self.capabilities.supports_view_columns_definition() && !column_list.is_empty() {
            sql.push_str(&column_list);
            sql.push(' ');
        }

        sql.push_str("AS ");
        sql.push_str(view.select_query());

        if let Some(check_option) = &options.check_option {
            sql.push_str(&format!(" WITH {} CHECK OPTION", check_option));
        }

        sql
    }

    /// Names are used verbatim; only column names are quoted. The column list
    /// is rendered whenever the dialect supports it, even if empty.
    pub fn create_mapping_view_sql(&self, new_name: &str, mapper: &MappingDefinition) -> String {
        let mut sql = format!("CREATE VIEW {} ", new_name);

        if self.capabilities.supports_view_columns_definition() {
            sql.push_str(&format!("({}) ", self.quote_columns(mapper.view_columns())));
        }

        sql.push_str(&format!(
            "AS SELECT {} FROM {}",
            self.quote_columns(mapper.select_columns()),
            mapper.source_table()
        ));

        sql
    }

    pub fn drop_virtual_table_sql(
        &self,
        name: &str,
        kind: VirtualTableKind,
        options: &VirtualTableOptions,
    ) -> String {
        let mut sql = format!("DROP {} {}", kind.keyword(), self.dialect.quote_table_name(name));
        if let Some(drop_behavior) = &options.drop_behavior {
            sql.push(' ');
            sql.push_str(drop_behavior);
        }
        sql
    }

    pub fn drop_table_cascade_sql(&self, table_name: &str) -> String {
        format!(
            "DROP TABLE {} CASCADE CONSTRAINTS",
            self.dialect.quote_table_name(table_name)
        )
    }

    pub fn create_function_sql(
        &self,
        name: &str,
        function_definition: &str,
        params: &ParamDefinition,
    ) -> String {
        format!(
            "CREATE OR REPLACE FUNCTION {}{} {} {}",
            self.dialect.quote_table_name(name),
            params.to_sql(self.dialect),
            self.dialect.function_body_keyword(),
            function_definition
        )
    }

    fn quote_columns(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.dialect.quote_column_name(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // The only place an execution error is swallowed.
    fn force_drop(&mut self, name: &str, kind: VirtualTableKind) {
        let sql = self.drop_virtual_table_sql(name, kind, &VirtualTableOptions::default());
        debug!("Force: dropping {} {} before create", kind, name);
        if let Err(e) = self.connection.execute(&sql) {
            debug!("Ignoring failed drop of {} {}: {}", kind, name, e);
        }
    }

    fn skip(&self, feature: Feature, name: &str) -> DdlOutcome {
        warn!(
            "Dialect '{}' does not support {}, skipping {}",
            self.dialect.name(),
            feature,
            name
        );
        DdlOutcome::Skipped { feature }
    }

    fn submit(&mut self, sql: String) -> Result<DdlOutcome, DdlError> {
        debug!("Submitting: {}", sql);
        self.connection.execute(&sql)?;
        info!("✅ {}", sql);
        Ok(DdlOutcome::Executed { sql })
    }
}
