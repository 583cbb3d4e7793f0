//! Structural sibling chains.
//!
//! A container record (block header, heavy polyline, insert with
//! attributes) owns an ordered sub-sequence of entities. The order is
//! materialized twice and both views must stay consistent: the container
//! holds first/last handles plus a parallel owned-member array, and each
//! owned entity holds previous/next sibling handles.
//!
//! Two kinds of non-member records can sit inside a chain:
//! - block bracketing entities (BLOCK/ENDBLK) are the absolute first and
//!   last of a block's chain,
//! - a SEQEND terminator closes every terminated sub-sequence at the tail.
//!
//! Neither appears in the owned-member array or the member count.

use crate::entities::EntityData;
use crate::error::{CadError, Result};
use crate::objects::ObjectData;
use crate::record::{Record, RecordData, RecordKind};
use crate::reference::HandleRef;
use crate::registry::Registry;
use crate::types::Handle;

/// Container-side chain state: boundary handles plus the owned-member
/// array. `count` always equals `owned.len()`; both are maintained
/// together on every insertion.
#[derive(Debug, Clone, Default)]
pub struct EntityChain {
    /// First chained entity (the BLOCK bracket for blocks)
    pub first: Option<Handle>,
    /// Last chained entity (the ENDBLK bracket for blocks); a SEQEND
    /// terminator trails behind this bound
    pub last: Option<Handle>,
    /// Number of owned members
    pub count: u32,
    /// Ordered owner references to the members
    pub owned: Vec<HandleRef>,
}

impl EntityChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is chained yet, brackets included.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Chain state of a container record, if it is a container.
pub(crate) fn chain_ref(record: &Record) -> Option<&EntityChain> {
    match &record.data {
        RecordData::Entity(EntityData::Polyline2D(p)) => Some(&p.chain),
        RecordData::Entity(EntityData::Polyline3D(p)) => Some(&p.chain),
        RecordData::Entity(EntityData::Insert(i)) => Some(&i.chain),
        RecordData::Object(ObjectData::BlockHeader(b)) => Some(&b.chain),
        _ => None,
    }
}

/// Mutable chain state of a container record.
pub(crate) fn chain_mut(record: &mut Record) -> Option<&mut EntityChain> {
    match &mut record.data {
        RecordData::Entity(EntityData::Polyline2D(p)) => Some(&mut p.chain),
        RecordData::Entity(EntityData::Polyline3D(p)) => Some(&mut p.chain),
        RecordData::Entity(EntityData::Insert(i)) => Some(&mut i.chain),
        RecordData::Object(ObjectData::BlockHeader(b)) => Some(&mut b.chain),
        _ => None,
    }
}

/// The terminator handle of a terminated container, if assigned.
pub(crate) fn terminator_of(record: &Record) -> Option<Handle> {
    match &record.data {
        RecordData::Entity(EntityData::Polyline2D(p)) => p.seqend,
        RecordData::Entity(EntityData::Polyline3D(p)) => p.seqend,
        RecordData::Entity(EntityData::Insert(i)) => i.seqend,
        _ => None,
    }
}

/// Assign the terminator handle on a terminated container.
pub(crate) fn set_terminator(record: &mut Record, seqend: Handle) {
    match &mut record.data {
        RecordData::Entity(EntityData::Polyline2D(p)) => p.seqend = Some(seqend),
        RecordData::Entity(EntityData::Polyline3D(p)) => p.seqend = Some(seqend),
        RecordData::Entity(EntityData::Insert(i)) => i.seqend = Some(seqend),
        _ => {}
    }
}

/// Whether this container kind closes its member sequence with a SEQEND.
pub fn requires_terminator(kind: RecordKind) -> bool {
    matches!(
        kind,
        RecordKind::Polyline2D
            | RecordKind::Polyline3D
            | RecordKind::PolylineMesh
            | RecordKind::PolylinePface
            | RecordKind::Insert
            | RecordKind::MInsert
    )
}

/// The closing bracket of a block header, if wired. Unlike a SEQEND
/// terminator, the bracket is inside the chain bounds: it is the chain's
/// absolute last.
fn end_bracket_of(record: &Record) -> Option<Handle> {
    match &record.data {
        RecordData::Object(ObjectData::BlockHeader(b)) => b.block_end,
        _ => None,
    }
}

fn sibling_links(record: &Record) -> Result<(Option<Handle>, Option<Handle>)> {
    let e = record
        .entity()
        .ok_or_else(|| CadError::InvalidArgument("chained record is not an entity".to_string()))?;
    Ok((e.common().prev, e.common().next))
}

fn set_prev(reg: &mut Registry, handle: Handle, prev: Option<Handle>) {
    if let Some(e) = reg.by_handle_mut(handle).and_then(|r| r.entity_mut()) {
        e.common_mut().prev = prev;
    }
}

fn set_next(reg: &mut Registry, handle: Handle, next: Option<Handle>) {
    if let Some(e) = reg.by_handle_mut(handle).and_then(|r| r.entity_mut()) {
        e.common_mut().next = next;
    }
}

fn require_resolved(reg: &Registry, handle: Handle, role: &str) -> Result<()> {
    if handle.is_null() {
        return Err(CadError::InvalidArgument(format!(
            "{role} has no handle assigned"
        )));
    }
    if reg.resolve(handle).is_none() {
        return Err(CadError::UnresolvedReference(handle.value()));
    }
    Ok(())
}

/// Append an owned member entity to a container's chain.
///
/// Both records must already be registered with valid handles; inserting
/// before handle assignment is a programming error and is rejected. The
/// member is linked after the current last regular member; a block's
/// ENDBLK bracket stays the chain's absolute last and a SEQEND terminator
/// stays linked behind the member bounds. The container's owned array and
/// count grow by one.
pub fn append_member(reg: &mut Registry, container: Handle, member: Handle) -> Result<()> {
    require_resolved(reg, container, "container")?;
    require_resolved(reg, member, "member")?;
    if container == member {
        return Err(CadError::InvalidArgument(
            "a container cannot own itself".to_string(),
        ));
    }

    let container_rec = reg.by_handle(container).expect("resolved above");
    let end_bracket = end_bracket_of(container_rec);
    let terminator = terminator_of(container_rec);
    let chain = chain_ref(container_rec).ok_or_else(|| {
        CadError::InvalidArgument(format!(
            "record {container} ({}) is not a chain container",
            container_rec.type_name()
        ))
    })?;
    let (first, last) = (chain.first, chain.last);

    let member_rec = reg.by_handle(member).expect("resolved above");
    if !member_rec.is_entity() {
        return Err(CadError::InvalidArgument(format!(
            "record {member} ({}) is not an entity",
            member_rec.type_name()
        )));
    }
    let (m_prev, m_next) = sibling_links(member_rec)?;
    if m_prev.is_some() || m_next.is_some() || first == Some(member) {
        return Err(CadError::InvalidArgument(format!(
            "entity {member} is already chained"
        )));
    }

    match (first, last) {
        (None, _) => {
            // first insertion: the member bounds the chain alone; an
            // already-wired terminator is re-linked behind it
            set_prev(reg, member, None);
            set_next(reg, member, terminator);
            if let Some(term) = terminator {
                set_prev(reg, term, Some(member));
            }
            let chain = chain_mut(reg.by_handle_mut(container).unwrap()).unwrap();
            chain.first = Some(member);
            chain.last = Some(member);
        }
        (Some(_), Some(tail)) if end_bracket == Some(tail) => {
            // blocks: the ENDBLK bracket keeps the absolute last slot
            let (before, _) = sibling_links(reg.by_handle(tail).expect("bracket resolves"))?;
            set_prev(reg, member, before);
            set_next(reg, member, Some(tail));
            set_prev(reg, tail, Some(member));
            match before {
                Some(b) => set_next(reg, b, Some(member)),
                None => {
                    let chain = chain_mut(reg.by_handle_mut(container).unwrap()).unwrap();
                    chain.first = Some(member);
                }
            }
        }
        (Some(_), Some(tail)) => {
            // append after the current last member, in front of any
            // trailing terminator
            set_next(reg, tail, Some(member));
            set_prev(reg, member, Some(tail));
            set_next(reg, member, terminator);
            if let Some(term) = terminator {
                set_prev(reg, term, Some(member));
            }
            let chain = chain_mut(reg.by_handle_mut(container).unwrap()).unwrap();
            chain.last = Some(member);
        }
        (Some(_), None) => {
            return Err(CadError::InvalidArgument(format!(
                "container {container} has a first but no last sibling"
            )));
        }
    }

    let chain = chain_mut(reg.by_handle_mut(container).unwrap()).unwrap();
    chain.owned.push(HandleRef::hard_owner(member));
    chain.count += 1;
    Ok(())
}

/// Wire a SEQEND terminator behind a terminated container's member bounds.
///
/// The terminator is chained after every existing member but never counted
/// as one, and never becomes the container's `first`/`last`: those bound
/// the member set only. A container holds at most one terminator.
pub fn attach_terminator(reg: &mut Registry, container: Handle, seqend: Handle) -> Result<()> {
    require_resolved(reg, container, "container")?;
    require_resolved(reg, seqend, "terminator")?;

    let container_rec = reg.by_handle(container).expect("resolved above");
    if !requires_terminator(container_rec.kind()) {
        return Err(CadError::InvalidArgument(format!(
            "record {container} ({}) does not take a terminator",
            container_rec.type_name()
        )));
    }
    if terminator_of(container_rec).is_some() {
        return Err(CadError::InvalidArgument(format!(
            "container {container} already has a terminator"
        )));
    }
    let seqend_rec = reg.by_handle(seqend).expect("resolved above");
    if seqend_rec.kind() != RecordKind::Seqend {
        return Err(CadError::InvalidArgument(format!(
            "record {seqend} ({}) is not a SEQEND",
            seqend_rec.type_name()
        )));
    }

    let chain = chain_ref(container_rec).expect("terminated containers have chains");
    let old_last = chain.last;

    set_prev(reg, seqend, old_last);
    set_next(reg, seqend, None);
    if let Some(tail) = old_last {
        set_next(reg, tail, Some(seqend));
    }

    set_terminator(reg.by_handle_mut(container).unwrap(), seqend);
    Ok(())
}

/// Wire the BLOCK/ENDBLK bracket pair of a block header.
///
/// The brackets become the absolute first and last of the block's chain.
/// Must run before any member insertion.
pub fn link_brackets(
    reg: &mut Registry,
    block: Handle,
    begin: Handle,
    end: Handle,
) -> Result<()> {
    require_resolved(reg, block, "block header")?;
    require_resolved(reg, begin, "block bracket")?;
    require_resolved(reg, end, "block bracket")?;

    let block_rec = reg.by_handle_mut(block).expect("resolved above");
    let header = match block_rec.object_mut() {
        Some(ObjectData::BlockHeader(b)) => b,
        _ => {
            return Err(CadError::InvalidArgument(format!(
                "record {block} is not a block header"
            )))
        }
    };
    if !header.chain.is_empty() {
        return Err(CadError::InvalidArgument(format!(
            "block {block} already has a chain"
        )));
    }
    header.block_begin = Some(begin);
    header.block_end = Some(end);
    header.chain.first = Some(begin);
    header.chain.last = Some(end);

    set_prev(reg, begin, None);
    set_next(reg, begin, Some(end));
    set_prev(reg, end, Some(begin));
    set_next(reg, end, None);
    Ok(())
}

/// Iterator over a container's chained entities, front to back.
///
/// Walks `first → next → …` and fuses after the container's `last`. The
/// step budget caps runaway walks on corrupted links; use
/// [`verify_chain`] to diagnose those.
pub struct ChainIter<'a> {
    reg: &'a Registry,
    next: Option<Handle>,
    last: Option<Handle>,
    budget: usize,
}

impl<'a> ChainIter<'a> {
    /// Iterate the chain of `container`. Empty if the record is missing or
    /// not a container.
    pub fn new(reg: &'a Registry, container: Handle) -> Self {
        let chain = reg.by_handle(container).and_then(chain_ref);
        let (next, last) = match chain {
            Some(c) => (c.first, c.last),
            None => (None, None),
        };
        ChainIter {
            reg,
            next,
            last,
            budget: reg.len() + 1,
        }
    }
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        if self.budget == 0 {
            return None;
        }
        self.budget -= 1;
        let current = self.next?;
        if Some(current) == self.last {
            self.next = None;
        } else {
            self.next = self
                .reg
                .by_handle(current)
                .and_then(|r| r.entity())
                .and_then(|e| e.common().next);
        }
        Some(current)
    }
}

/// Walk a container's chain and check its structural invariants.
///
/// Verifies, in one central place:
/// - the walk from `first` reaches `last` without cycles,
/// - member count equals the owned array length and the owned array lists
///   exactly the walked members in order,
/// - every member's owner reference targets the container,
/// - block brackets sit at the absolute front and back,
/// - terminated containers have exactly one SEQEND, linked after all
///   members and outside the member bounds.
pub fn verify_chain(reg: &Registry, container: Handle) -> Result<()> {
    let container_rec = reg
        .by_handle(container)
        .ok_or(CadError::RecordNotFound(container.value()))?;
    let chain = chain_ref(container_rec).ok_or_else(|| {
        CadError::InvalidArgument(format!("record {container} is not a chain container"))
    })?;
    let is_block = container_rec.kind() == RecordKind::BlockHeader;
    let terminated = requires_terminator(container_rec.kind());
    let brackets = match &container_rec.data {
        RecordData::Object(ObjectData::BlockHeader(b)) => (b.block_begin, b.block_end),
        _ => (None, None),
    };
    let terminator = terminator_of(container_rec);

    // walk with explicit cycle detection
    let mut walked = Vec::new();
    let mut cursor = chain.first;
    let mut steps = 0usize;
    while let Some(h) = cursor {
        steps += 1;
        if steps > reg.len() {
            return Err(CadError::InvalidArgument(format!(
                "cycle detected in chain of {container}"
            )));
        }
        let rec = reg
            .by_handle(h)
            .ok_or(CadError::UnresolvedReference(h.value()))?;
        walked.push(h);
        if Some(h) == chain.last {
            break;
        }
        cursor = rec
            .entity()
            .ok_or_else(|| {
                CadError::InvalidArgument(format!("chained record {h} is not an entity"))
            })?
            .common()
            .next;
        if cursor.is_none() {
            return Err(CadError::InvalidArgument(format!(
                "chain of {container} ends before its last sibling"
            )));
        }
    }

    // split off the block brackets; they are chained but not members
    let mut members = walked.clone();
    if is_block {
        if members.is_empty() {
            if brackets.0.is_some() || brackets.1.is_some() {
                return Err(CadError::InvalidArgument(format!(
                    "block {container} has brackets but an empty chain"
                )));
            }
        } else {
            if members.first().copied() != brackets.0 || members.last().copied() != brackets.1 {
                return Err(CadError::InvalidArgument(format!(
                    "block {container} brackets do not bound its chain"
                )));
            }
            members.remove(0);
            members.pop();
        }
    }

    // the terminator sits behind the member bounds, after every member
    if let Some(term) = terminator {
        let term_rec = reg
            .by_handle(term)
            .ok_or(CadError::UnresolvedReference(term.value()))?;
        if term_rec.kind() != RecordKind::Seqend {
            return Err(CadError::InvalidArgument(format!(
                "terminator of {container} is not a SEQEND"
            )));
        }
        let (t_prev, t_next) = sibling_links(term_rec)?;
        if t_prev != chain.last || t_next.is_some() {
            return Err(CadError::InvalidArgument(format!(
                "terminator of {container} is not linked at the chain tail"
            )));
        }
        if let Some(tail) = chain.last {
            let (_, tail_next) = sibling_links(reg.by_handle(tail).expect("walked above"))?;
            if tail_next != Some(term) {
                return Err(CadError::InvalidArgument(format!(
                    "last member of {container} does not lead to its terminator"
                )));
            }
        }
    }
    if terminated && !members.is_empty() && terminator.is_none() {
        return Err(CadError::InvalidArgument(format!(
            "container {container} has members but no terminator"
        )));
    }
    for &h in &members {
        let rec = reg.by_handle(h).expect("walked above");
        if rec.kind() == RecordKind::Seqend {
            return Err(CadError::InvalidArgument(format!(
                "stray SEQEND inside chain of {container}"
            )));
        }
    }

    // count and owned array agree with the walk
    if chain.owned.len() != chain.count as usize {
        return Err(CadError::InvalidArgument(format!(
            "container {container} count {} disagrees with owned array length {}",
            chain.count,
            chain.owned.len()
        )));
    }
    if members.len() != chain.owned.len() {
        return Err(CadError::InvalidArgument(format!(
            "container {container} owns {} members but chains {}",
            chain.owned.len(),
            members.len()
        )));
    }
    for (walked, owned) in members.iter().zip(chain.owned.iter()) {
        if *walked != owned.value {
            return Err(CadError::InvalidArgument(format!(
                "owned array of {container} disagrees with chain order"
            )));
        }
    }

    // member ownership points back at the container
    for &h in &members {
        let rec = reg.by_handle(h).expect("walked above");
        if rec.envelope.owner.value != container {
            return Err(CadError::UnresolvedReference(h.value()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityData, Seqend, Vertex2D};
    use crate::entities::polyline::Polyline2D;
    use crate::record::{Envelope, Record, RecordData};
    use crate::types::Vector3;

    fn add_polyline(reg: &mut Registry) -> Handle {
        let h = reg.next_handle();
        reg.add(Record::new(
            h,
            Envelope::new(),
            RecordData::Entity(EntityData::Polyline2D(Polyline2D::new())),
        ))
        .unwrap();
        h
    }

    fn add_vertex(reg: &mut Registry, owner: Handle) -> Handle {
        let h = reg.next_handle();
        reg.add(Record::new(
            h,
            Envelope::owned_by(HandleRef::hard_owner(owner)),
            RecordData::Entity(EntityData::Vertex2D(Vertex2D::at(Vector3::ZERO))),
        ))
        .unwrap();
        h
    }

    fn add_seqend(reg: &mut Registry, owner: Handle) -> Handle {
        let h = reg.next_handle();
        reg.add(Record::new(
            h,
            Envelope::owned_by(HandleRef::hard_owner(owner)),
            RecordData::Entity(EntityData::Seqend(Seqend::new())),
        ))
        .unwrap();
        h
    }

    #[test]
    fn test_first_member_bounds_chain() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let v = add_vertex(&mut reg, pl);
        append_member(&mut reg, pl, v).unwrap();

        let chain = chain_ref(reg.by_handle(pl).unwrap()).unwrap();
        assert_eq!(chain.first, Some(v));
        assert_eq!(chain.last, Some(v));
        assert_eq!(chain.count, 1);
    }

    #[test]
    fn test_append_links_siblings() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let a = add_vertex(&mut reg, pl);
        let b = add_vertex(&mut reg, pl);
        append_member(&mut reg, pl, a).unwrap();
        append_member(&mut reg, pl, b).unwrap();

        let (prev, next) = sibling_links(reg.by_handle(b).unwrap()).unwrap();
        assert_eq!(prev, Some(a));
        assert_eq!(next, None);
        let (prev, next) = sibling_links(reg.by_handle(a).unwrap()).unwrap();
        assert_eq!(prev, None);
        assert_eq!(next, Some(b));
    }

    #[test]
    fn test_terminator_stays_behind_member_bounds() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let se = add_seqend(&mut reg, pl);
        attach_terminator(&mut reg, pl, se).unwrap();

        let a = add_vertex(&mut reg, pl);
        let b = add_vertex(&mut reg, pl);
        append_member(&mut reg, pl, a).unwrap();
        append_member(&mut reg, pl, b).unwrap();

        // first/last bound the members; the terminator trails them
        let order: Vec<Handle> = ChainIter::new(&reg, pl).collect();
        assert_eq!(order, vec![a, b]);
        let chain = chain_ref(reg.by_handle(pl).unwrap()).unwrap();
        assert_eq!(chain.count, 2);
        assert_eq!(chain.first, Some(a));
        assert_eq!(chain.last, Some(b));

        let (prev, next) = sibling_links(reg.by_handle(se).unwrap()).unwrap();
        assert_eq!(prev, Some(b));
        assert_eq!(next, None);
        let (_, b_next) = sibling_links(reg.by_handle(b).unwrap()).unwrap();
        assert_eq!(b_next, Some(se));
        verify_chain(&reg, pl).unwrap();
    }

    #[test]
    fn test_second_terminator_rejected() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let s1 = add_seqend(&mut reg, pl);
        let s2 = add_seqend(&mut reg, pl);
        attach_terminator(&mut reg, pl, s1).unwrap();
        assert!(attach_terminator(&mut reg, pl, s2).is_err());
    }

    #[test]
    fn test_unregistered_member_rejected() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let err = append_member(&mut reg, pl, Handle::NULL).unwrap_err();
        assert!(matches!(err, CadError::InvalidArgument(_)));
        let err = append_member(&mut reg, pl, Handle::new(0xBEEF)).unwrap_err();
        assert!(matches!(err, CadError::UnresolvedReference(_)));
    }

    #[test]
    fn test_double_append_rejected() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let v = add_vertex(&mut reg, pl);
        append_member(&mut reg, pl, v).unwrap();
        assert!(append_member(&mut reg, pl, v).is_err());
    }

    #[test]
    fn test_verify_detects_count_mismatch() {
        let mut reg = Registry::default();
        let pl = add_polyline(&mut reg);
        let v = add_vertex(&mut reg, pl);
        append_member(&mut reg, pl, v).unwrap();

        chain_mut(reg.by_handle_mut(pl).unwrap()).unwrap().count = 5;
        assert!(verify_chain(&reg, pl).is_err());
    }
}
