//! Runs against a live ODBC data source named by `VIEWDDL_TEST_CONN`.
//! Enable with `--features integration`.
#![cfg(feature = "integration")]

use viewddl::ddl::{DdlError, DdlSynthesizer, VirtualTableOptions};
use viewddl::dialects;
use viewddl::executor::{ConnectionManager, DatabaseExecutor, SchemaConnection};

fn connection_string() -> Option<String> {
    std::env::var("VIEWDDL_TEST_CONN").ok()
}

#[test]
fn test_view_lifecycle() {
    let Some(conn) = connection_string() else {
        eprintln!("VIEWDDL_TEST_CONN not set, skipping");
        return;
    };

    let dialect = dialects::get_dialect_with_config(None, Some(conn.as_str()), None).unwrap();
    let manager = ConnectionManager::new().unwrap();
    let connection = manager.connect(&conn).unwrap();
    let mut executor = DatabaseExecutor::new(connection, dialect.clone());

    executor
        .execute("CREATE TABLE viewddl_people (id INTEGER, nm VARCHAR(50))")
        .unwrap();

    let mut ddl = DdlSynthesizer::new(dialect.as_ref(), &mut executor);

    ddl.create_view("viewddl_v", "SELECT id FROM viewddl_people", &VirtualTableOptions::forced())
        .unwrap();
    ddl.create_mapping_view("viewddl_people", "viewddl_mapped", &VirtualTableOptions::forced(), |m| {
        m.map("nm", "name")?;
        Ok(())
    })
    .unwrap();

    let err = ddl
        .create_mapping_view("viewddl_people", "viewddl_bad", &VirtualTableOptions::default(), |m| {
            m.map("missing", "x")?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, DdlError::InvalidColumn { .. }));

    ddl.drop_view("viewddl_mapped", &VirtualTableOptions::default()).unwrap();
    ddl.drop_view("viewddl_v", &VirtualTableOptions::default()).unwrap();
    assert!(ddl.drop_view("viewddl_v", &VirtualTableOptions::default()).is_err());

    executor.execute("DROP TABLE viewddl_people").unwrap();
}
