//! End-to-end population against an in-memory SQLite database.

#![cfg(all(feature = "sqlx", feature = "yaml"))]

mod helpers;

use helpers::test_data::TestDataLoader;
use rstest::*;
use sqlfixture::prelude::*;
use sqlx::{Connection, SqliteConnection};

const SETUP_QUERIES: &[&str] = &[
	"CREATE TABLE test (id INTEGER PRIMARY KEY, name VARCHAR(30))",
	"CREATE TABLE test2 (id INTEGER PRIMARY KEY, slug VARCHAR(30))",
	"INSERT INTO test (id, name) VALUES (99, 'stale')",
	"INSERT INTO test2 (id, slug) VALUES (42, 'stale')",
];

#[fixture]
async fn conn() -> SqliteConnection {
	let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
	for query in SETUP_QUERIES {
		sqlx::query(query).execute(&mut conn).await.unwrap();
	}
	conn
}

fn sqlite() -> PopulateOptions {
	PopulateOptions::new().with_dialect(Dialect::Sqlite)
}

async fn evaluate_common_fixture(conn: &mut SqliteConnection) {
	let test: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM test ORDER BY id")
		.fetch_all(&mut *conn)
		.await
		.unwrap();
	assert_eq!(test, vec![(1, "something".to_string())]);

	let test2: Vec<(i64, String)> = sqlx::query_as("SELECT id, slug FROM test2 ORDER BY id")
		.fetch_all(&mut *conn)
		.await
		.unwrap();
	assert_eq!(
		test2,
		vec![
			(1, "something".to_string()),
			(2, "something-else".to_string()),
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_populate_explicit_tables(#[future] conn: SqliteConnection) {
	let mut conn = conn.await;
	let tables = vec![
		Table::new("test").with_row(Row::new().with("id", 1).with("name", "something")),
		Table::new("test2").with_rows([
			Row::new().with("id", 1).with("slug", "something"),
			Row::new().with("id", 2).with("slug", "something-else"),
		]),
	];

	let report = Fixture::new(&mut conn, tables)
		.with_options(sqlite())
		.populate()
		.await
		.unwrap();

	assert_eq!(report.tables_truncated, 2);
	assert_eq!(report.rows_inserted, 3);
	evaluate_common_fixture(&mut conn).await;
}

#[rstest]
#[case("test.yaml")]
#[case("test.json")]
#[tokio::test]
async fn test_populate_from_file(#[future] conn: SqliteConnection, #[case] name: &str) {
	let mut conn = conn.await;
	let path = TestDataLoader::new().path(name);

	Fixture::from_path(&mut conn, path)
		.unwrap()
		.with_options(sqlite())
		.populate()
		.await
		.unwrap();

	evaluate_common_fixture(&mut conn).await;
}

#[rstest]
#[tokio::test]
async fn test_populate_twice_is_repeatable(#[future] conn: SqliteConnection) {
	let mut conn = conn.await;
	let bytes = TestDataLoader::new().load("test.yaml");

	for _ in 0..2 {
		Fixture::from_yaml(&mut conn, &bytes)
			.unwrap()
			.with_options(sqlite())
			.populate()
			.await
			.unwrap();
	}

	evaluate_common_fixture(&mut conn).await;
}

#[rstest]
#[tokio::test]
async fn test_unknown_table_is_fatal(#[future] conn: SqliteConnection) {
	let mut conn = conn.await;
	let tables = vec![
		Table::new("test").with_row(Row::new().with("id", 1).with("name", "something")),
		Table::new("missing").with_row(Row::new().with("id", 1)),
		Table::new("test2").with_row(Row::new().with("id", 1).with("slug", "something")),
	];

	let error = Fixture::new(&mut conn, tables)
		.with_options(sqlite())
		.populate()
		.await
		.unwrap_err();

	assert!(matches!(
		&error,
		FixtureError::Truncate { table, .. } if table == "missing"
	));

	// Tables before the failure are populated, tables after it are untouched.
	let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test")
		.fetch_one(&mut conn)
		.await
		.unwrap();
	assert_eq!(count, 1);
	let (slug,): (String,) = sqlx::query_as("SELECT slug FROM test2")
		.fetch_one(&mut conn)
		.await
		.unwrap();
	assert_eq!(slug, "stale");
}

#[rstest]
#[tokio::test]
async fn test_constraint_violation_is_fatal(#[future] conn: SqliteConnection) {
	let mut conn = conn.await;
	let tables = vec![Table::new("test2").with_rows([
		Row::new().with("id", 1).with("slug", "first"),
		Row::new().with("id", 1).with("slug", "duplicate"),
		Row::new().with("id", 3).with("slug", "never"),
	])];

	let error = Fixture::new(&mut conn, tables)
		.with_options(sqlite())
		.populate()
		.await
		.unwrap_err();

	assert!(matches!(error, FixtureError::Insert { row: 1, .. }));
	let ids: Vec<(i64,)> = sqlx::query_as("SELECT id FROM test2 ORDER BY id")
		.fetch_all(&mut conn)
		.await
		.unwrap();
	assert_eq!(ids, vec![(1,)]);
}
