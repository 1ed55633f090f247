// event_core/src/introspect.rs
//! Member discovery over a type's schema plus its base mix-ins.
//! Pure: no side effects beyond the returned set.
use crate::event::value::ValueKind;
use crate::scene::schema::MemberSet;

/// Merges the concrete type's member set with its base sets (in the
/// supplied order), drops methods with any unsupported parameter,
/// sorts each kind by member name (ordinal ascending, ties keep the
/// own-before-base discovery order), and deduplicates by name with the
/// earliest declaration winning.
pub fn discover(own: MemberSet, bases: &[MemberSet]) -> MemberSet {
    let mut out = own;
    for base in bases {
        out.extend(base.clone());
    }

    // All-or-nothing per method: one disqualified parameter drops it.
    out.methods.retain(|m| {
        m.params
            .iter()
            .all(|p| p.value.kind != ValueKind::Unsupported)
    });

    out.fields.sort_by(|a, b| a.name.cmp(b.name));
    out.properties.sort_by(|a, b| a.name.cmp(b.name));
    out.methods.sort_by(|a, b| a.name.cmp(b.name));

    out.fields.dedup_by(|a, b| a.name == b.name);
    out.properties.dedup_by(|a, b| a.name == b.name);
    out.methods.dedup_by(|a, b| a.name == b.name);

    out
}
