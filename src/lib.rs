#![doc = r#"
Cypher compilation for an object-graph mapper on Neo4j.

`grapho` turns in-memory graph changes and declarative filters into
parameterized Cypher statements. It never talks to the database itself:
every statement is plain text plus a parameter map, ready to hand to
[`neo4rs`] 0.8 (a [`Statement`] converts into a `neo4rs::Query`).

# Quick start

## Compile mutations

Collect the changes of one unit of work in a [`CypherCompiler`]. Changes of
the same shape are batched into a single `UNWIND $rows AS row ...` statement:

```rust
use grapho::prelude::*;

let mut compiler = CypherCompiler::new();
compiler.new_node(Node::new_unsaved(-1).with_label("Planet").with_property("name", "Earth"));
compiler.new_node(Node::new_unsaved(-2).with_label("Planet").with_property("name", "Mars"));

let statements = compiler.all_statements()?;
assert_eq!(statements.len(), 1);
assert_eq!(
    statements[0].text(),
    "UNWIND $rows as row CREATE (n:`Planet`) SET n=row.props \
     RETURN row.nodeRef as ref, ID(n) as id, $type as type"
);
# Ok::<(), GraphoError>(())
```

## Optimistic locking

Entities carrying a version property are matched on the version the caller
last saw, and the version is incremented in the same statement. The
statement carries an [`OptimisticLockingConfig`]; check the affected row
count after execution:

```rust
use grapho::prelude::*;

let edge = Edge::existing(7, "ORBITS", 1, 2).with_version("version", 3_i64);
let statement = ExistingRelationshipStatementBuilder::new().build(&ChangeSet::try_from_vec(vec![edge])?)?;

let locking = statement.optimistic_locking().expect("versioned");
assert!(locking.verify(1).is_ok());
assert!(locking.verify(0).is_err());
# Ok::<(), GraphoError>(())
```

## Compile filters

```rust
use grapho::prelude::*;

let filters = Filters::from(Filter::new("moons", ComparisonOperator::LessThan, 23_i64))
    .and(Filter::new("name", ComparisonOperator::Like, "Jup*"));

let query = build_node_query("Planet", &filters)?;
assert_eq!(
    query.text(),
    "MATCH (n:`Planet`) WHERE n.`moons` < $moons_0 AND n.`name` =~ $name_1 "
);
assert_eq!(query.parameters()["name_1"], Value::from("(?i)Jup.*"));
# Ok::<(), GraphoError>(())
```

# Error handling

Everything fallible returns [`GraphoError`]. Compilation errors are wrapped
with `.with_context()` naming the category being compiled:

```text
compiling existing nodes: missing internal id on node with reference 12
```

[`neo4rs`]: https://docs.rs/neo4rs
"#]

pub mod compiler;
mod cypher;
pub mod filter;
pub mod prelude;

pub use grapho_core as core;

pub use compiler::{CompileContext, CypherCompiler, StatementBuilder};
pub use filter::{build_node_query, build_relationship_query, Filter, Filters, FilteredQuery};
pub use grapho_core::{ChangeSet, Edge, GraphoError, Node, OptimisticLockingConfig, Statement, Value};
