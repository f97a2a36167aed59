//! Axis-aligned overlap tests and minimum-penetration resolution.
//!
//! A mover is pushed out of a fixed rectangle along the single axis with the
//! shallowest penetration. That choice decides corner cases: a body clipping
//! a tile corner lands on top when it is barely below the surface, and is
//! stopped by the side when it is barely past the edge.

use crate::core::body::{Body, Rect};

/// A mover resting on a rectangle may sit this far from the exact surface
/// and still count as standing on it.
const REST_TOLERANCE: f32 = 0.5;

/// Strict intersection test. Touching edges do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Face of the fixed rectangle the mover is pushed back through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Depth of the mover inside the fixed rectangle, measured from each face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Mover's right edge past the fixed left face.
    pub left: f32,
    /// Fixed right face past the mover's left edge.
    pub right: f32,
    /// Mover's bottom past the fixed top face.
    pub top: f32,
    /// Fixed bottom face past the mover's top.
    pub bottom: f32,
}

impl Penetration {
    pub fn between(mover: &Rect, fixed: &Rect) -> Self {
        Self {
            left: mover.right() - fixed.left(),
            right: fixed.right() - mover.left(),
            top: mover.bottom() - fixed.top(),
            bottom: fixed.bottom() - mover.top(),
        }
    }

    /// The face with the smallest penetration. Exact ties resolve in the
    /// order top, bottom, left, right.
    pub fn shallowest(&self) -> Side {
        let mut side = Side::Top;
        let mut depth = self.top;
        for (candidate, d) in [
            (Side::Bottom, self.bottom),
            (Side::Left, self.left),
            (Side::Right, self.right),
        ] {
            if d < depth {
                side = candidate;
                depth = d;
            }
        }
        side
    }
}

/// Outcome of a resolved overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Mover placed on the top surface; vertical velocity zeroed, grounded.
    Landed,
    /// Mover's head pushed below the bottom surface.
    HeadBump,
    /// Mover stopped against a side face. `Side::Left` means it was moving
    /// right into the rectangle's left face.
    Wall(Side),
    /// Lateral push suppressed because the mover already stands on this
    /// rectangle. Counts as support for the frame.
    Supported,
}

/// Push `mover` out of `fixed`. No-op unless the two overlap.
///
/// `landing_offset` is how many pixels the mover's sprite is allowed to sink
/// into the top surface when it lands.
pub fn resolve(mover: &mut Body, fixed: &Rect, landing_offset: f32) -> Option<Contact> {
    let rect = mover.rect();
    if !overlaps(&rect, fixed) {
        return None;
    }

    match Penetration::between(&rect, fixed).shallowest() {
        Side::Top if mover.vel.y >= 0.0 => {
            mover.pos.y = fixed.top() - rect.size.y + landing_offset;
            mover.vel.y = 0.0;
            mover.on_ground = true;
            Some(Contact::Landed)
        }
        Side::Bottom if mover.vel.y <= 0.0 => {
            mover.pos.y = fixed.bottom();
            mover.vel.y = 0.0;
            Some(Contact::HeadBump)
        }
        Side::Left | Side::Right if rests_on(mover, fixed, landing_offset) => Some(Contact::Supported),
        Side::Left if mover.vel.x > 0.0 => {
            mover.pos.x = fixed.left() - rect.size.x;
            mover.vel.x = 0.0;
            Some(Contact::Wall(Side::Left))
        }
        Side::Right if mover.vel.x < 0.0 => {
            mover.pos.x = fixed.right();
            mover.vel.x = 0.0;
            Some(Contact::Wall(Side::Right))
        }
        _ => None,
    }
}

fn rests_on(mover: &Body, fixed: &Rect, landing_offset: f32) -> bool {
    mover.on_ground && (mover.bottom() - landing_offset - fixed.top()).abs() <= REST_TOLERANCE
}

/// Summary of one mover's pass against every platform in a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleReport {
    pub resolved: usize,
    /// The last side face the mover was stopped by, if any.
    pub wall: Option<Side>,
}

/// Resolve `mover` against every rectangle, then clear `on_ground` when
/// nothing supported it and it is not moving up.
pub fn settle<'a, I, F>(mover: &mut Body, fixed: I, mut landing_offset: F) -> SettleReport
where
    I: IntoIterator<Item = &'a Rect>,
    F: FnMut(&Rect) -> f32,
{
    let mut report = SettleReport::default();
    for rect in fixed {
        if let Some(contact) = resolve(mover, rect, landing_offset(rect)) {
            report.resolved += 1;
            if let Contact::Wall(side) = contact {
                report.wall = Some(side);
            }
        }
    }
    if report.resolved == 0 && mover.vel.y >= 0.0 {
        mover.on_ground = false;
    }
    report
}
