//! Property tests for command rendering and table list normalization.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use dbdump_core::{CommonOptions, MongoDb, MySql, Sqlite, TableList};
use proptest::prelude::*;
use std::path::Path;

fn table_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

fn table_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(table_name(), 1..8)
}

proptest! {
    #[test]
    fn prop_mysql_render_is_deterministic(
        db in table_name(),
        tables in table_names(),
        user in "[a-zA-Z0-9]{1,10}",
        password in "[ -~]{0,16}",
        extras in prop::collection::vec("--[a-z-]{1,12}", 0..4),
        single_transaction in any::<bool>(),
    ) {
        let mut dumper = MySql::new()
            .with_db_name(db)
            .with_user_name(user)
            .with_password(password)
            .exclude_tables(tables)
            .unwrap();
        for extra in extras {
            dumper = dumper.add_extra_option(extra);
        }
        if single_transaction {
            dumper = dumper.use_single_transaction();
        }

        let first = dumper.dump_command(Path::new("dump.sql"), Path::new("c.cnf"));
        let second = dumper.dump_command(Path::new("dump.sql"), Path::new("c.cnf"));
        prop_assert_eq!(first.tokens(), second.tokens());
        let (first_file, second_file) = (
            dumper.credentials_file_contents(),
            dumper.credentials_file_contents(),
        );
        prop_assert_eq!(first_file.as_str(), second_file.as_str());
    }

    #[test]
    fn prop_mongodb_render_is_deterministic(
        db in table_name(),
        port in 1u16..,
        compress in any::<bool>(),
    ) {
        let mut dumper = MongoDb::new().with_db_name(db).with_port(port);
        if compress {
            dumper = dumper.enable_compression();
        }
        let first = dumper.dump_command(Path::new("out.gz"));
        prop_assert_eq!(&first, &dumper.dump_command(Path::new("out.gz")));
        prop_assert_eq!(first.tokens().last().map(String::as_str) == Some("--gzip"), compress);
    }

    #[test]
    fn prop_sqlite_render_is_deterministic(db in "[ -~]{1,24}") {
        let dumper = Sqlite::new().with_db_name(db);
        prop_assert_eq!(
            dumper.dump_command(Path::new("d.sql")).command_line(),
            dumper.dump_command(Path::new("d.sql")).command_line()
        );
    }

    #[test]
    fn prop_string_and_sequence_table_lists_agree(
        tables in table_names(),
        use_comma in any::<bool>(),
    ) {
        let separator = if use_comma { ", " } else { " " };
        let joined = tables.join(separator);
        prop_assert_eq!(TableList::from(joined.as_str()), TableList::from(tables.clone()));
        let list = TableList::from(tables.clone());
        prop_assert_eq!(list.names(), tables.as_slice());
    }

    #[test]
    fn prop_exclude_string_and_array_render_identically(tables in table_names()) {
        let joined = tables.join(", ");
        let from_string = MySql::new().with_db_name("db").exclude_tables(joined.as_str()).unwrap();
        let from_array = MySql::new().with_db_name("db").exclude_tables(tables.clone()).unwrap();
        prop_assert_eq!(
            from_string.dump_command(Path::new("d.sql"), Path::new("c")),
            from_array.dump_command(Path::new("d.sql"), Path::new("c"))
        );
    }

    #[test]
    fn prop_include_and_exclude_always_conflict(
        included in table_names(),
        excluded in table_names(),
    ) {
        let include_first = MySql::new().include_tables(included.clone()).unwrap();
        prop_assert!(include_first.exclude_tables(excluded.clone()).unwrap_err().is_configuration_error());

        let exclude_first = MySql::new().exclude_tables(excluded).unwrap();
        prop_assert!(exclude_first.include_tables(included).unwrap_err().is_configuration_error());
    }
}
