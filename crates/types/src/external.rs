//! ASN.1 EXTERNAL structural type
//!
//! ```text
//! EXTERNAL ::= SEQUENCE {
//!     identification         CHOICE { ... },
//!     data-value-descriptor  ObjectDescriptor OPTIONAL,
//!     data-value             OCTET STRING
//! }
//! ```
//!
//! The composite is bound as soon as any field is bound, and is a value
//! only when `identification` and `data_value` are values and
//! `data_value_descriptor` is either omitted or a value.
//!
//! Fields are marshalled in declaration order; the CHOICE writes its
//! selector (0..=5, in the order of [`Identification`]) before the
//! selected alternative.

use crate::{Integer, ObjectDescriptor, ObjectIdentifier, OctetString};
use ttcn_core::{
    check_operands, field_equals, unbound_encoding, BaseValue, Binding, Error, LogSink, Marshal,
    Optional, Result, TextBuf, ValueEq,
};

fn log_field<T: BaseValue>(sink: &mut dyn LogSink, first: bool, name: &str, value: &T) {
    sink.write_str(if first { "{ " } else { ", " });
    sink.write_str(name);
    sink.write_str(" := ");
    value.log(sink);
}

// ============================================================================
// identification.syntaxes
// ============================================================================

/// `syntaxes` alternative: abstract and transfer syntax pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Syntaxes {
    /// Abstract syntax
    pub abstract_: ObjectIdentifier,
    /// Transfer syntax
    pub transfer: ObjectIdentifier,
}

impl BaseValue for Syntaxes {
    const TYPE_NAME: &'static str = "EXTERNAL.identification.syntaxes";

    fn is_bound(&self) -> bool {
        self.abstract_.is_bound() || self.transfer.is_bound()
    }

    fn is_value(&self) -> bool {
        self.abstract_.is_value() && self.transfer.is_value()
    }

    fn clean_up(&mut self) {
        self.abstract_.clean_up();
        self.transfer.clean_up();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        if !self.is_bound() {
            return sink.write_unbound();
        }
        log_field(sink, true, "abstract", &self.abstract_);
        log_field(sink, false, "transfer", &self.transfer);
        sink.write_str(" }");
    }
}

impl ValueEq for Syntaxes {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(field_equals(&self.abstract_, &other.abstract_)?
            && field_equals(&self.transfer, &other.transfer)?)
    }
}

impl Marshal for Syntaxes {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        buf.push_all(|buf| {
            self.abstract_.encode_text(buf)?;
            self.transfer.encode_text(buf)
        })
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        *self = buf.pull_all(|buf| {
            let mut decoded = Syntaxes::default();
            decoded.abstract_.decode_text(buf)?;
            decoded.transfer.decode_text(buf)?;
            Ok(decoded)
        })?;
        Ok(())
    }
}

// ============================================================================
// identification.context-negotiation
// ============================================================================

/// `context-negotiation` alternative
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextNegotiation {
    /// Presentation context identifier
    pub presentation_context_id: Integer,
    /// Transfer syntax
    pub transfer_syntax: ObjectIdentifier,
}

impl BaseValue for ContextNegotiation {
    const TYPE_NAME: &'static str = "EXTERNAL.identification.context-negotiation";

    fn is_bound(&self) -> bool {
        self.presentation_context_id.is_bound() || self.transfer_syntax.is_bound()
    }

    fn is_value(&self) -> bool {
        self.presentation_context_id.is_value() && self.transfer_syntax.is_value()
    }

    fn clean_up(&mut self) {
        self.presentation_context_id.clean_up();
        self.transfer_syntax.clean_up();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        if !self.is_bound() {
            return sink.write_unbound();
        }
        log_field(sink, true, "presentation_context_id", &self.presentation_context_id);
        log_field(sink, false, "transfer_syntax", &self.transfer_syntax);
        sink.write_str(" }");
    }
}

impl ValueEq for ContextNegotiation {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(
            field_equals(&self.presentation_context_id, &other.presentation_context_id)?
                && field_equals(&self.transfer_syntax, &other.transfer_syntax)?,
        )
    }
}

impl Marshal for ContextNegotiation {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        buf.push_all(|buf| {
            self.presentation_context_id.encode_text(buf)?;
            self.transfer_syntax.encode_text(buf)
        })
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        *self = buf.pull_all(|buf| {
            let mut decoded = ContextNegotiation::default();
            decoded.presentation_context_id.decode_text(buf)?;
            decoded.transfer_syntax.decode_text(buf)?;
            Ok(decoded)
        })?;
        Ok(())
    }
}

// ============================================================================
// identification
// ============================================================================

/// Alternatives of the `identification` CHOICE
#[derive(Debug, Clone, PartialEq)]
pub enum Identification {
    /// Abstract and transfer syntax
    Syntaxes(Syntaxes),
    /// Single syntax identifier
    Syntax(ObjectIdentifier),
    /// Negotiated presentation context
    PresentationContextId(Integer),
    /// Presentation context plus transfer syntax
    ContextNegotiation(ContextNegotiation),
    /// Transfer syntax only
    TransferSyntax(ObjectIdentifier),
    /// Agreed between the communicating parties
    Fixed,
}

impl Identification {
    fn selector(&self) -> i64 {
        match self {
            Identification::Syntaxes(_) => 0,
            Identification::Syntax(_) => 1,
            Identification::PresentationContextId(_) => 2,
            Identification::ContextNegotiation(_) => 3,
            Identification::TransferSyntax(_) => 4,
            Identification::Fixed => 5,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Identification::Syntaxes(_) => "syntaxes",
            Identification::Syntax(_) => "syntax",
            Identification::PresentationContextId(_) => "presentation_context_id",
            Identification::ContextNegotiation(_) => "context_negotiation",
            Identification::TransferSyntax(_) => "transfer_syntax",
            Identification::Fixed => "fixed",
        }
    }

    fn is_bound(&self) -> bool {
        match self {
            Identification::Syntaxes(v) => v.is_bound(),
            Identification::Syntax(v) | Identification::TransferSyntax(v) => v.is_bound(),
            Identification::PresentationContextId(v) => v.is_bound(),
            Identification::ContextNegotiation(v) => v.is_bound(),
            Identification::Fixed => true,
        }
    }

    fn is_value(&self) -> bool {
        match self {
            Identification::Syntaxes(v) => v.is_value(),
            Identification::Syntax(v) | Identification::TransferSyntax(v) => v.is_value(),
            Identification::PresentationContextId(v) => v.is_value(),
            Identification::ContextNegotiation(v) => v.is_value(),
            Identification::Fixed => true,
        }
    }
}

/// The `identification` CHOICE of EXTERNAL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalIdentification(Binding<Identification>);

impl ExternalIdentification {
    /// Select an alternative
    pub fn new(selection: Identification) -> Self {
        ExternalIdentification(Binding::Bound(selection))
    }

    /// Select the `syntax` alternative
    pub fn syntax(oid: ObjectIdentifier) -> Self {
        Self::new(Identification::Syntax(oid))
    }

    /// Select the `fixed` alternative
    pub fn fixed() -> Self {
        Self::new(Identification::Fixed)
    }

    /// The selected alternative
    ///
    /// # Errors
    ///
    /// Returns a binding error if nothing is selected.
    pub fn selection(&self) -> Result<&Identification> {
        self.0.get(Self::TYPE_NAME)
    }

    /// Replace the selected alternative
    pub fn select(&mut self, selection: Identification) {
        self.0.set(selection);
    }
}

impl BaseValue for ExternalIdentification {
    const TYPE_NAME: &'static str = "EXTERNAL.identification";

    fn is_bound(&self) -> bool {
        self.0.as_option().is_some_and(Identification::is_bound)
    }

    fn is_value(&self) -> bool {
        self.0.as_option().is_some_and(Identification::is_value)
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        let selection = match self.0.as_option() {
            Some(selection) => selection,
            None => return sink.write_unbound(),
        };
        sink.write_str("{ ");
        sink.write_str(selection.name());
        sink.write_str(" := ");
        match selection {
            Identification::Syntaxes(v) => v.log(sink),
            Identification::Syntax(v) | Identification::TransferSyntax(v) => v.log(sink),
            Identification::PresentationContextId(v) => v.log(sink),
            Identification::ContextNegotiation(v) => v.log(sink),
            Identification::Fixed => sink.write_str("NULL"),
        }
        sink.write_str(" }");
    }
}

impl ValueEq for ExternalIdentification {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        let (lhs, rhs) = (self.selection()?, other.selection()?);
        match (lhs, rhs) {
            (Identification::Syntaxes(a), Identification::Syntaxes(b)) => a.equals(b),
            (Identification::Syntax(a), Identification::Syntax(b))
            | (Identification::TransferSyntax(a), Identification::TransferSyntax(b)) => a.equals(b),
            (Identification::PresentationContextId(a), Identification::PresentationContextId(b)) => {
                a.equals(b)
            }
            (Identification::ContextNegotiation(a), Identification::ContextNegotiation(b)) => {
                a.equals(b)
            }
            (Identification::Fixed, Identification::Fixed) => Ok(true),
            _ => Ok(false),
        }
    }
}

impl Marshal for ExternalIdentification {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        let selection = self
            .0
            .as_option()
            .ok_or_else(|| unbound_encoding(Self::TYPE_NAME))?;
        buf.push_all(|buf| {
            buf.push_int(selection.selector());
            match selection {
                Identification::Syntaxes(v) => v.encode_text(buf),
                Identification::Syntax(v) | Identification::TransferSyntax(v) => v.encode_text(buf),
                Identification::PresentationContextId(v) => v.encode_text(buf),
                Identification::ContextNegotiation(v) => v.encode_text(buf),
                Identification::Fixed => Ok(()),
            }
        })
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        let selection = buf.pull_all(decode_selection)?;
        self.0.set(selection);
        Ok(())
    }
}

fn decode_selection(buf: &mut TextBuf) -> Result<Identification> {
    let selection = match buf.pull_int()? {
        0 => {
            let mut v = Syntaxes::default();
            v.decode_text(buf)?;
            Identification::Syntaxes(v)
        }
        1 => {
            let mut v = ObjectIdentifier::default();
            v.decode_text(buf)?;
            Identification::Syntax(v)
        }
        2 => {
            let mut v = Integer::default();
            v.decode_text(buf)?;
            Identification::PresentationContextId(v)
        }
        3 => {
            let mut v = ContextNegotiation::default();
            v.decode_text(buf)?;
            Identification::ContextNegotiation(v)
        }
        4 => {
            let mut v = ObjectIdentifier::default();
            v.decode_text(buf)?;
            Identification::TransferSyntax(v)
        }
        5 => Identification::Fixed,
        other => {
            return Err(Error::marshalling(format!(
                "Text decoder: Unrecognized union selector {} was received for type {}.",
                other,
                ExternalIdentification::TYPE_NAME
            )))
        }
    };
    Ok(selection)
}

// ============================================================================
// EXTERNAL
// ============================================================================

/// ASN.1 `EXTERNAL`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct External {
    /// How the data value is identified
    pub identification: ExternalIdentification,
    /// Optional human-readable description
    pub data_value_descriptor: Optional<ObjectDescriptor>,
    /// Encoded data
    pub data_value: OctetString,
}

impl External {
    /// Build a fully bound value
    ///
    /// A `None` descriptor is stored as an explicit omit.
    pub fn new(
        identification: ExternalIdentification,
        data_value_descriptor: Option<ObjectDescriptor>,
        data_value: OctetString,
    ) -> Self {
        External {
            identification,
            data_value_descriptor: match data_value_descriptor {
                Some(descriptor) => Optional::Present(descriptor),
                None => Optional::Omit,
            },
            data_value,
        }
    }
}

impl BaseValue for External {
    const TYPE_NAME: &'static str = "EXTERNAL";

    fn is_bound(&self) -> bool {
        self.identification.is_bound()
            || self.data_value_descriptor.is_bound()
            || self.data_value.is_bound()
    }

    fn is_value(&self) -> bool {
        self.identification.is_value()
            && self.data_value_descriptor.is_value()
            && self.data_value.is_value()
    }

    fn clean_up(&mut self) {
        self.identification.clean_up();
        self.data_value_descriptor.clean_up();
        self.data_value.clean_up();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        if !self.is_bound() {
            return sink.write_unbound();
        }
        log_field(sink, true, "identification", &self.identification);
        log_field(sink, false, "data_value_descriptor", &self.data_value_descriptor);
        log_field(sink, false, "data_value", &self.data_value);
        sink.write_str(" }");
    }
}

impl ValueEq for External {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(field_equals(&self.identification, &other.identification)?
            && field_equals(&self.data_value_descriptor, &other.data_value_descriptor)?
            && field_equals(&self.data_value, &other.data_value)?)
    }
}

impl Marshal for External {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        if !self.is_bound() {
            return Err(unbound_encoding(Self::TYPE_NAME));
        }
        buf.push_all(|buf| {
            self.identification.encode_text(buf)?;
            self.data_value_descriptor.encode_text(buf)?;
            self.data_value.encode_text(buf)
        })
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        *self = buf.pull_all(|buf| {
            let mut decoded = External::default();
            decoded.identification.decode_text(buf)?;
            decoded.data_value_descriptor.decode_text(buf)?;
            decoded.data_value.decode_text(buf)?;
            Ok(decoded)
        })?;
        Ok(())
    }
}
