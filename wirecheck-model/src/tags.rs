//! Schema annotation tags.
//!
//! The declaration model reports annotations by these tags; the host adapter
//! maps its own annotation types onto them.

/// Marks a message class.
pub const MESSAGE: &str = "Message";
/// Marks a protocol-version specific variant of a message.
pub const MESSAGE_VARIANT: &str = "MessageVariant";
/// Marks a polymorphic root or a polymorphic subclass.
pub const POLYMORPHIC: &str = "Polymorphic";
/// Marks an enum that is encoded on the wire.
pub const NETWORK_ENUM: &str = "NetworkEnum";
/// Marks the handler method of a variant.
pub const HANDLER: &str = "Handler";
/// Marks a partial handler method of a variant.
pub const PARTIAL_HANDLER: &str = "PartialHandler";
/// Parameter role: value taken from a field of the message.
pub const ARGUMENT: &str = "Argument";
/// Parameter role (and field directive): default-constructed value.
pub const DEFAULT_CONSTRUCT: &str = "DefaultConstruct";
/// Parameter role: value filled in by generated code.
pub const FILLED_ARGUMENT: &str = "FilledArgument";
/// Parameter role: connection-wide global data.
pub const GLOBAL_DATA: &str = "GlobalData";
/// Field directive: explicit wire type.
pub const TYPE: &str = "Type";
/// Field directive: registry the value is an id of.
pub const REGISTRY: &str = "Registry";
/// Field directive: length prefix handling.
pub const LENGTH: &str = "Length";
/// Field directive: inclusion predicate.
pub const ONLY_IF: &str = "OnlyIf";
/// Field directive: datafixer type.
pub const DATAFIX: &str = "Datafix";
/// Field directive: polymorphic discriminator field.
pub const POLYMORPHIC_BY: &str = "PolymorphicBy";
/// Field directive (repeatable): introduce a field absent in another version.
pub const INTRODUCE: &str = "Introduce";
/// Field directive (repeatable): custom translation fix.
pub const CUSTOM_FIX: &str = "CustomFix";
/// Method directive (repeatable): possible element type of a `List<Object>` return.
pub const RETURN_TYPE: &str = "ReturnType";
