//! Static metadata and documentation served by the lookup services.

use super::entities::ServiceMetaData;
use overlay_types::Protocol;

/// Metadata for `protocol`'s lookup service.
pub fn metadata(protocol: Protocol) -> ServiceMetaData {
    let (name, short_description) = match protocol {
        Protocol::Ship => ("SHIP Lookup Service", "Provides lookup capabilities for SHIP tokens."),
        Protocol::Slap => ("SLAP Lookup Service", "Provides lookup capabilities for SLAP tokens."),
    };
    ServiceMetaData {
        name: name.to_string(),
        short_description: short_description.to_string(),
        icon_url: None,
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        information_url: None,
    }
}

/// Markdown documentation for `protocol`'s lookup service.
pub fn documentation(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Ship => SHIP_DOCS,
        Protocol::Slap => SLAP_DOCS,
    }
}

const SHIP_DOCS: &str = r#"# SHIP Lookup Service

Answers `ls_ship` questions about hosts that advertise the topics they
track (Service Host Interconnect Protocol).

## Query

Either the string `"findAll"` or an object:

| Field | Type | Meaning |
|-------|------|---------|
| `findAll` | boolean | ignore filters, page over every record |
| `domain` | string | exact advertised URI |
| `topics` | string[] | any of these `tm_` topics |
| `identityKey` | string | compressed identity key, hex |
| `limit` | integer >= 0 | page size, 0 or absent for all |
| `skip` | integer >= 0 | records to skip |
| `sortOrder` | `"asc"` \| `"desc"` | by admission time, default `"desc"` |

## Answer

`{"type": "output-list", "outputs": [{"txid": "...", "outputIndex": 0}]}`
"#;

const SLAP_DOCS: &str = r#"# SLAP Lookup Service

Answers `ls_slap` questions about hosts that advertise the lookup services
they provide (Service Lookup Availability Protocol).

## Query

Either the string `"findAll"` or an object:

| Field | Type | Meaning |
|-------|------|---------|
| `findAll` | boolean | ignore filters, page over every record |
| `domain` | string | exact advertised URI |
| `services` | string[] | any of these `ls_` services (alias: `topics`) |
| `identityKey` | string | compressed identity key, hex |
| `limit` | integer >= 0 | page size, 0 or absent for all |
| `skip` | integer >= 0 | records to skip |
| `sortOrder` | `"asc"` \| `"desc"` | by admission time, default `"desc"` |

## Answer

`{"type": "output-list", "outputs": [{"txid": "...", "outputIndex": 0}]}`
"#;
