use redb::TableDefinition;

/// Shared document container: (partition key, document id) -> JSON bytes.
///
/// Users and videos live in the same table, discriminated by the `type`
/// field inside the stored document. Point operations address a record by
/// both halves of the key; queries by id alone scan across partitions.
pub const DOCUMENTS: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("documents");

/// Video processing queue: sequence number -> transport envelope (JSON text)
pub const QUEUE: TableDefinition<u64, &str> = TableDefinition::new("queue");
