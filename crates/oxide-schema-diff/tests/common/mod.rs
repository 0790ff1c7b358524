#![allow(dead_code)]

use oxide_schema_diff::prelude::*;

pub const SOURCE_SQL: &str = "
SET NAMES utf8mb4;

CREATE TABLE `t1` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `normal` varchar(32) NOT NULL DEFAULT '',
  `will_be_change` int(11) DEFAULT NULL,
  `will_be_delete` int(11) DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `normal_idx` (`normal`),
  KEY `will_be_change_idx` (`will_be_change`),
  KEY `will_be_change2_idx` (`will_be_change`,`normal`),
  KEY `will_be_delete_idx` (`will_be_delete`)
) ENGINE=InnoDB AUTO_INCREMENT=10 DEFAULT CHARSET=utf8mb4;

CREATE TABLE `t2` (
  `id` int(11) NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='before';

CREATE TABLE `only_source` (
  `id` int(11) NOT NULL
) ENGINE=InnoDB;
";

pub const TARGET_SQL: &str = "
SET NAMES utf8mb4;

CREATE TABLE `t1` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `normal` varchar(32) NOT NULL DEFAULT '',
  `will_be_change` bigint(20) DEFAULT NULL,
  `will_be_append` int(11) DEFAULT NULL,
  PRIMARY KEY (`normal`),
  KEY `normal_idx` (`normal`),
  UNIQUE KEY `will_be_change_idx` (`will_be_change`),
  KEY `will_be_change2_idx` (`normal`,`will_be_change`),
  KEY `will_be_append_idx` (`will_be_append`)
) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4;

CREATE TABLE `t2` (
  `id` int(11) NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='after';

CREATE TABLE `only_target` (
  `id` int(11) NOT NULL,
  `name` varchar(64) DEFAULT NULL COMMENT 'display name',
  PRIMARY KEY (`id`)
) ENGINE=InnoDB;
";

pub fn diff(source: &str, target: &str, policy: &IgnorePolicy) -> Vec<ChangeStatement> {
    diff_sql(None, source, target, policy)
        .unwrap_or_else(|e| panic!("Failed to diff\nError: {e}"))
}

pub fn snapshot(sql: &str) -> SchemaSnapshot {
    let mut store = SchemaStore::new(None);
    store
        .apply(sql)
        .unwrap_or_else(|e| panic!("Failed to replay: {sql}\nError: {e}"));
    store.into_snapshot()
}

/// Returns the rendered ALTER specs for `table`, or an empty list when no
/// ALTER TABLE names it.
pub fn alter_specs(changes: &[ChangeStatement], table: &str) -> Vec<String> {
    changes
        .iter()
        .find_map(|change| match change {
            ChangeStatement::AlterTable { table: name, specs } if name.name == table => {
                Some(specs.iter().map(ToString::to_string).collect())
            }
            _ => None,
        })
        .unwrap_or_default()
}

pub fn rendered(changes: &[ChangeStatement]) -> Vec<String> {
    changes.iter().map(ToString::to_string).collect()
}
