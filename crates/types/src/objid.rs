//! Object identifier value type

use ttcn_core::{
    check_operands, unbound_encoding, BaseValue, Binding, Error, LogSink, Marshal, Result, TextBuf,
    ValueEq,
};

/// TTCN-3 / ASN.1 `objid`: a sequence of unsigned arcs
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier(Binding<Vec<u32>>);

impl ObjectIdentifier {
    /// Create a bound object identifier
    pub fn new(arcs: impl Into<Vec<u32>>) -> Self {
        ObjectIdentifier(Binding::Bound(arcs.into()))
    }

    /// Borrow the arcs
    ///
    /// # Errors
    ///
    /// Returns a binding error if unbound.
    pub fn arcs(&self) -> Result<&[u32]> {
        self.0.get(Self::TYPE_NAME).map(Vec::as_slice)
    }
}

impl BaseValue for ObjectIdentifier {
    const TYPE_NAME: &'static str = "objid";

    fn is_bound(&self) -> bool {
        self.0.is_bound()
    }

    fn clean_up(&mut self) {
        self.0.clear();
    }

    fn log(&self, sink: &mut dyn LogSink) {
        match &self.0 {
            Binding::Bound(arcs) => {
                sink.write_str("objid {");
                for arc in arcs {
                    sink.write_char(' ');
                    sink.write_str(&arc.to_string());
                }
                sink.write_str(" }");
            }
            Binding::Unbound => sink.write_unbound(),
        }
    }
}

impl ValueEq for ObjectIdentifier {
    fn equals(&self, other: &Self) -> Result<bool> {
        check_operands(self, other)?;
        Ok(self.0 == other.0)
    }
}

impl Marshal for ObjectIdentifier {
    fn encode_text(&self, buf: &mut TextBuf) -> Result<()> {
        let arcs = self
            .0
            .as_option()
            .ok_or_else(|| unbound_encoding(Self::TYPE_NAME))?;
        buf.push_int(arcs.len() as i64);
        for arc in arcs {
            buf.push_int(i64::from(*arc));
        }
        Ok(())
    }

    fn decode_text(&mut self, buf: &mut TextBuf) -> Result<()> {
        let arcs = buf.pull_all(|buf| {
            let count = buf.pull_len()?;
            let mut arcs = Vec::with_capacity(count.min(buf.remaining()));
            for _ in 0..count {
                let arc = buf.pull_int()?;
                let arc = u32::try_from(arc).map_err(|_| {
                    Error::marshalling(format!(
                        "Text decoder: Object identifier arc {} out of range.",
                        arc
                    ))
                })?;
                arcs.push(arc);
            }
            Ok(arcs)
        })?;
        self.0.set(arcs);
        Ok(())
    }
}
