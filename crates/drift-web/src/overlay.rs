//! DOM side of the overlay: creates the video cards, dots and connector lines
//! an [`OverlayPlan`] describes, applies per-frame placements, and tears the
//! nodes down on dismissal.

use crate::constants::{OVERLAY_LAYER_ID, OVERLAY_Z_INDEX};
use crate::dom;
use crate::style;
use drift_core::{
    Connector, ConnectorLink, Dismissal, NodeFrame, NodeId, OverlayPlan, Rect, VideoAsset,
    VideoCard, FADE_OUT_MS,
};
use fnv::FnvHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Autoplay can be refused by the browser; the card stays up either way.
fn watch_playback(promise: js_sys::Promise, asset: VideoAsset) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
            log::warn!("[overlay] video {} did not start: {:?}", asset.0, e);
        }
    });
}

pub struct Presenter {
    document: web::Document,
    layer: web::HtmlElement,
    nodes: FnvHashMap<NodeId, web::HtmlElement>,
    primary: Option<NodeId>,
}

impl Presenter {
    pub fn new(document: web::Document) -> anyhow::Result<Self> {
        let layer = dom::create_html(&document, "div")?;
        layer.set_id(OVERLAY_LAYER_ID);
        _ = layer.set_attribute(
            "style",
            &format!(
                "position:fixed;left:0;top:0;width:100%;height:100%;overflow:hidden;\
                 pointer-events:none;z-index:{}",
                OVERLAY_Z_INDEX
            ),
        );
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?;
        body.append_child(&layer)
            .map_err(|e| anyhow::anyhow!("append overlay layer: {:?}", e))?;
        Ok(Self {
            document,
            layer,
            nodes: FnvHashMap::default(),
            primary: None,
        })
    }

    /// Creates every node of `plan`. Nodes start transparent; the first
    /// [`apply`](Self::apply) positions them.
    pub fn build(&mut self, plan: &OverlayPlan) {
        for card in plan.cards() {
            if let Err(e) = self.create_video(card) {
                log::error!("[overlay] video {}: {:?}", card.asset.0, e);
            }
        }
        for dot in &plan.dots {
            match dom::create_html(&self.document, "div") {
                Ok(el) => {
                    _ = el.set_attribute("style", &style::dot_css(dot.color, dot.diameter));
                    self.attach(dot.node, el);
                }
                Err(e) => log::error!("[overlay] dot: {:?}", e),
            }
            match dom::create_html(&self.document, "div") {
                Ok(el) => {
                    _ = el.set_attribute("style", &style::line_css(dot.color));
                    self.attach(dot.line, el);
                }
                Err(e) => log::error!("[overlay] connector: {:?}", e),
            }
        }
        self.primary = Some(plan.primary.node);
        log::info!(
            "[overlay] built {:?}: {} nodes",
            plan.id,
            self.nodes.len()
        );
    }

    fn create_video(&mut self, card: &VideoCard) -> anyhow::Result<()> {
        let video = dom::create_html(&self.document, "video")?
            .dyn_into::<web::HtmlVideoElement>()
            .map_err(|_| anyhow::anyhow!("<video> is not an HtmlVideoElement"))?;
        video.set_src(&card.asset.path());
        video.set_autoplay(true);
        video.set_muted(true);
        video.set_loop(true);
        _ = video.set_attribute("playsinline", "");
        _ = video.set_attribute(
            "style",
            &style::card_css(card.role, card.size.x, card.size.y),
        );
        match video.play() {
            Ok(promise) => watch_playback(promise, card.asset),
            Err(e) => log::warn!("[overlay] video {} play(): {:?}", card.asset.0, e),
        }
        self.attach(card.node, video.unchecked_into::<web::HtmlElement>());
        Ok(())
    }

    fn attach(&mut self, node: NodeId, el: web::HtmlElement) {
        _ = self.layer.append_child(&el);
        self.nodes.insert(node, el);
    }

    /// Applies this frame's placement to every animated node.
    pub fn apply(&self, frames: &[NodeFrame]) {
        for f in frames {
            let Some(el) = self.nodes.get(&f.node) else {
                continue;
            };
            dom::set_style(el, "left", &style::px(f.left));
            dom::set_style(el, "top", &style::px(f.top));
            dom::set_style(el, "opacity", &format!("{:.3}", f.opacity));
            dom::set_style(el, "transform", &style::scale(f.scale));
        }
    }

    /// Redraws each connector from the live bounding boxes of its endpoints.
    pub fn redraw_connectors(&self, links: &[ConnectorLink]) {
        for link in links {
            let (Some(line), Some(dot), Some(target)) = (
                self.nodes.get(&link.line),
                self.nodes.get(&link.dot),
                self.nodes.get(&link.target),
            ) else {
                continue;
            };
            let c = Connector::between_rects(dom::element_rect(dot), dom::element_rect(target));
            let corner = style::connector_top_left(&c);
            dom::set_style(line, "left", &style::px(corner.x));
            dom::set_style(line, "top", &style::px(corner.y));
            dom::set_style(line, "width", &style::px(c.length));
            dom::set_style(line, "transform", &style::connector_transform(&c));
        }
    }

    /// Live on-screen bounds of the primary card.
    pub fn primary_rect(&self) -> Option<Rect> {
        let el = self.nodes.get(&self.primary?)?;
        Some(dom::element_rect(el))
    }

    /// Fades out every node of a dismissed overlay, then removes it.
    pub fn dismiss(&mut self, d: &Dismissal) {
        let mut leaving: Vec<web::HtmlElement> = Vec::with_capacity(d.nodes.len());
        for node in &d.nodes {
            if let Some(el) = self.nodes.remove(node) {
                dom::set_style(&el, "transition", &style::fade_out_transition(FADE_OUT_MS));
                dom::set_style(&el, "opacity", "0");
                dom::set_style(&el, "transform", &style::scale(0.5));
                if let Some(video) = el.dyn_ref::<web::HtmlVideoElement>() {
                    _ = video.pause();
                }
                leaving.push(el);
            }
        }
        self.primary = None;
        let count = leaving.len();
        let Some(window) = web::window() else {
            leaving.iter().for_each(|el| el.remove());
            return;
        };
        let remove = Closure::once_into_js(move || {
            for el in leaving {
                el.remove();
            }
        });
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                FADE_OUT_MS,
            )
            .is_err()
        {
            log::warn!("[overlay] removal timer failed for {:?}", d.overlay);
        }
        log::info!("[overlay] removing {} nodes of {:?}", count, d.overlay);
    }
}
