//! Overlay planning and animation: which videos to show for a pick, where
//! they start, and how cards and decorative dots move afterwards.
//!
//! Nothing here touches the DOM. Every visual element gets a [`NodeId`]; the
//! frontend maps ids to elements and applies [`NodeFrame`]s each frame.

use crate::constants::*;
use crate::tasks::{Task, TaskStatus};
use crate::view::{Rect, Viewport};
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// One numbered file of the video catalog (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoAsset(pub u32);

impl VideoAsset {
    /// Catalog entry for a particle's buffer index: `(index mod len) + 1`.
    #[inline]
    pub fn for_point(index: usize, catalog_len: usize) -> Self {
        Self((index % catalog_len.max(1)) as u32 + 1)
    }

    pub fn path(&self) -> String {
        format!("{}{}{}", VIDEO_PATH_PREFIX, self.0, VIDEO_PATH_SUFFIX)
    }
}

/// Point indices whose videos accompany a pick: `index-1, index+1, index+2`,
/// skipping negatives and the index itself.
pub fn related_indices(index: usize) -> SmallVec<[usize; 3]> {
    [index as i64 - 1, index as i64 + 1, index as i64 + 2]
        .into_iter()
        .filter(|&i| i >= 0 && i != index as i64)
        .map(|i| i as usize)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardRole {
    Primary,
    Related,
}

/// A video element to create.
#[derive(Clone, Debug)]
pub struct VideoCard {
    pub node: NodeId,
    pub role: CardRole,
    pub point_index: usize,
    pub asset: VideoAsset,
    pub size: Vec2,
    /// Top-left corner at creation time.
    pub origin: Vec2,
}

/// A decorative glowing dot plus the line tying it to its video.
#[derive(Clone, Debug)]
pub struct DotSpec {
    pub node: NodeId,
    pub line: NodeId,
    pub target: NodeId,
    pub diameter: f32,
    pub color: [f32; 3],
    /// Top-left corner at creation time.
    pub origin: Vec2,
}

/// Everything the presenter needs to build one overlay.
#[derive(Clone, Debug)]
pub struct OverlayPlan {
    pub id: OverlayId,
    pub cluster: usize,
    pub primary: VideoCard,
    pub related: SmallVec<[VideoCard; 3]>,
    pub dots: Vec<DotSpec>,
}

impl OverlayPlan {
    pub fn cards(&self) -> impl Iterator<Item = &VideoCard> + '_ {
        std::iter::once(&self.primary).chain(self.related.iter())
    }

    /// Every node the plan creates, in creation order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.cards().map(|c| c.node).collect();
        for d in &self.dots {
            out.push(d.node);
            out.push(d.line);
        }
        out
    }
}

/// Per-frame placement of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame {
    pub node: NodeId,
    pub left: f32,
    pub top: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// Line from a dot to its video; redrawn every frame from live geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorLink {
    pub line: NodeId,
    pub dot: NodeId,
    pub target: NodeId,
}

/// Straight segment between two screen points, as length and angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub origin: Vec2,
    pub length: f32,
    pub angle_rad: f32,
}

impl Connector {
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        Self {
            origin: from,
            length: d.length(),
            angle_rad: d.y.atan2(d.x),
        }
    }

    /// Connector between the centers of two boxes.
    pub fn between_rects(from: Rect, to: Rect) -> Self {
        Self::between(from.center(), to.center())
    }
}

/// Clamps a box of `size` so it lies inside the viewport.
pub fn clamp_into(pos: Vec2, size: Vec2, viewport: Viewport) -> Vec2 {
    let max = (viewport.size() - size).max(Vec2::ZERO);
    pos.clamp(Vec2::ZERO, max)
}

/// Moves a box by `vel`, reflecting the velocity off each viewport edge it crosses.
pub fn bounce(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, viewport: Viewport) {
    *pos += *vel;
    let max = (viewport.size() - size).max(Vec2::ZERO);
    if pos.x < 0.0 || pos.x > max.x {
        vel.x = -vel.x;
        pos.x = pos.x.clamp(0.0, max.x);
    }
    if pos.y < 0.0 || pos.y > max.y {
        vel.y = -vel.y;
        pos.y = pos.y.clamp(0.0, max.y);
    }
}

pub fn random_velocity_2d<R: Rng + ?Sized>(rng: &mut R, max: f32) -> Vec2 {
    Vec2::new(rng.gen_range(-max..=max), rng.gen_range(-max..=max))
}

/// Frame context handed to overlay tasks.
#[derive(Clone, Copy, Debug)]
pub struct OverlayTick {
    pub viewport: Viewport,
}

/// Animated element of an overlay: cards fade/scale in and, when they have a
/// velocity, bounce; dots fade in and always bounce.
#[derive(Clone, Debug)]
pub struct Motion {
    pub node: NodeId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub fade: f32,
    pub link: Option<ConnectorLink>,
}

impl Motion {
    pub fn frame(&self) -> NodeFrame {
        let e = crate::transition::ease_out_cubic(self.fade);
        NodeFrame {
            node: self.node,
            left: self.pos.x,
            top: self.pos.y,
            opacity: e,
            scale: FADE_IN_START_SCALE + (1.0 - FADE_IN_START_SCALE) * e,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

impl Task<OverlayTick> for Motion {
    fn step(&mut self, ctx: &OverlayTick) -> TaskStatus {
        self.fade = (self.fade + FADE_IN_STEP).min(1.0);
        if self.vel != Vec2::ZERO {
            bounce(&mut self.pos, &mut self.vel, self.size, ctx.viewport);
        }
        TaskStatus::Running
    }
}

/// Hands out node ids that are never reused within a session.
#[derive(Clone, Debug, Default)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Inputs for building a plan, gathered by the session at pick time.
pub struct PlanRequest<'a> {
    pub id: OverlayId,
    pub cluster: usize,
    pub index: usize,
    pub click: Vec2,
    pub viewport: Viewport,
    pub color: [f32; 3],
    pub catalog_len: usize,
    /// Screen positions of the nearest neighbours, closest first; `None`
    /// where a neighbour does not project onto the screen.
    pub neighbor_screens: &'a [Option<Vec2>],
}

/// Builds the overlay for a pick and the motions that animate it.
pub fn plan_overlay<R: Rng + ?Sized>(
    req: &PlanRequest<'_>,
    ids: &mut NodeIds,
    rng: &mut R,
) -> (OverlayPlan, Vec<Motion>) {
    let primary_size = Vec2::from_array(PRIMARY_SIZE);
    let thumb_size = Vec2::from_array(THUMB_SIZE);
    let mut motions = Vec::new();

    let primary = VideoCard {
        node: ids.next(),
        role: CardRole::Primary,
        point_index: req.index,
        asset: VideoAsset::for_point(req.index, req.catalog_len),
        size: primary_size,
        origin: clamp_into(req.click, primary_size, req.viewport),
    };
    motions.push(Motion {
        node: primary.node,
        pos: primary.origin,
        vel: Vec2::ZERO,
        size: primary_size,
        fade: 0.0,
        link: None,
    });

    let mut related: SmallVec<[VideoCard; 3]> = SmallVec::new();
    for (k, idx) in related_indices(req.index).into_iter().enumerate() {
        let anchor = req
            .neighbor_screens
            .get(k)
            .copied()
            .flatten()
            .unwrap_or_else(|| req.viewport.center());
        let card = VideoCard {
            node: ids.next(),
            role: CardRole::Related,
            point_index: idx,
            asset: VideoAsset::for_point(idx, req.catalog_len),
            size: thumb_size,
            origin: clamp_into(anchor - thumb_size * 0.5, thumb_size, req.viewport),
        };
        motions.push(Motion {
            node: card.node,
            pos: card.origin,
            vel: random_velocity_2d(rng, THUMB_SPEED_MAX),
            size: thumb_size,
            fade: 0.0,
            link: None,
        });
        related.push(card);
    }

    let mut dots = Vec::new();
    let cards: Vec<(NodeId, Vec2, Vec2)> = std::iter::once(&primary)
        .chain(related.iter())
        .map(|c: &VideoCard| (c.node, c.origin, c.size))
        .collect();
    for (target, origin, size) in cards {
        let diameter = rng.gen_range(DOT_DIAMETER_MIN..=DOT_DIAMETER_MAX);
        let dot_size = Vec2::splat(diameter);
        let center = origin + size * 0.5;
        let offset = random_velocity_2d(rng, DOT_SPAWN_SPREAD);
        let spec = DotSpec {
            node: ids.next(),
            line: ids.next(),
            target,
            diameter,
            color: req.color,
            origin: clamp_into(center + offset - dot_size * 0.5, dot_size, req.viewport),
        };
        motions.push(Motion {
            node: spec.node,
            pos: spec.origin,
            vel: random_velocity_2d(rng, DOT_SPEED_MAX),
            size: dot_size,
            fade: 0.0,
            link: Some(ConnectorLink {
                line: spec.line,
                dot: spec.node,
                target,
            }),
        });
        dots.push(spec);
    }

    let plan = OverlayPlan {
        id: req.id,
        cluster: req.cluster,
        primary,
        related,
        dots,
    };
    (plan, motions)
}
