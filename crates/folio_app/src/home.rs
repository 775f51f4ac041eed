//! Home page composition
//!
//! [`HomePage`] owns every component of the landing page and routes host
//! events to them:
//!
//! - scroll and resize events mark the scroll layout dirty; the next
//!   animation frame computes the ratio once and feeds it to the hero
//!   animator and the navigation controller
//! - pager navigation starts a card load for the new page; a load that was
//!   superseded by a later navigation is dropped when it completes
//! - pointer events over a contact card drive that card's tilt
//! - contact triggers open the image modal; Escape, the backdrop and the
//!   close button dismiss it
//!
//! Card loads, the quote and the background preload are the only
//! asynchronous work. Their futures borrow the shared [`CardLoader`], not
//! the page, so hosts may run them concurrently and hand the results back.

use std::rc::Rc;

use folio_animation::{
    ContactTilt, HeroAnimator, HeroTargets, HeroVisualState, ScrollRatioEngine, TiltSurfaces,
};
use folio_content::{
    preload_background, CardLoader, CardOutcome, Catalog, ContentConfig, ContentError,
    ContentRegion, Fetcher, PageLoads, PageTicket, QuoteTargets, QuoteWidget,
};
use folio_core::{Event, FrameScheduler, Surface, Viewport};
use folio_widgets::{
    ModalClick, ModalSurfaces, ModalViewer, NavSurfaces, NavVisibility, NavVisibilityController,
    PageRange, Pager, PagerView,
};
use tracing::{debug, info};

use crate::config::FolioConfig;

/// Presentation targets of the home page
#[derive(Debug, Default)]
pub struct HomeSurfaces {
    pub hero: HeroTargets,
    pub nav: NavSurfaces,
    pub quote: QuoteTargets,
    /// Element receiving the `bgloaded` class
    pub background: Surface,
    /// One entry per contact card
    pub contacts: Vec<TiltSurfaces>,
    pub modal: ModalSurfaces,
}

/// Pager navigation requested by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNav {
    To(usize),
    Next,
    Previous,
    First,
    Last,
}

/// A started page load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: PageTicket,
    /// Articles to load, `None` for an empty catalog
    pub range: Option<PageRange>,
}

/// Load the cards of `request`
pub async fn load_page<F: Fetcher>(
    loader: &CardLoader<F>,
    request: &PageRequest,
) -> Vec<CardOutcome> {
    match request.range {
        Some(range) => loader.load_range(range.indices()).await,
        None => Vec::new(),
    }
}

/// Scroll-driven state, updated once per frame
struct ScrollLayout {
    ratio: ScrollRatioEngine,
    hero: HeroAnimator,
    nav: NavVisibilityController,
    scroll_y: f32,
    viewport: Viewport,
    hero_state: Option<HeroVisualState>,
}

impl ScrollLayout {
    fn update(&mut self) {
        let collapsed = self.hero.config().collapsed_height;
        let Some(ratio) = self
            .ratio
            .update(self.scroll_y, self.viewport.height, collapsed)
        else {
            return;
        };
        self.hero_state = Some(self.hero.apply(ratio, self.viewport));
        self.nav.update(ratio);
    }
}

/// The landing page
pub struct HomePage<F> {
    layout: ScrollLayout,
    frames: FrameScheduler<ScrollLayout>,
    pager: Pager,
    loads: PageLoads,
    loader: Rc<CardLoader<F>>,
    region: ContentRegion,
    quote: QuoteWidget,
    contacts: Vec<ContactTilt>,
    modal: ModalViewer,
    background: Surface,
    content: ContentConfig,
}

impl<F: Fetcher> HomePage<F> {
    /// Assemble the page around a loader whose catalog is already known
    pub fn new(
        config: &FolioConfig,
        surfaces: HomeSurfaces,
        viewport: Viewport,
        loader: CardLoader<F>,
    ) -> Self {
        let catalog = loader.catalog();
        let pager = Pager::new(catalog.count(), catalog.page_size());

        let contacts = surfaces
            .contacts
            .into_iter()
            .map(|card| ContactTilt::new(config.tilt.clone(), card, viewport))
            .collect();

        let mut frames = FrameScheduler::new();
        frames.register(|layout: &mut ScrollLayout, _| layout.update());
        // Lay out the hero on the first frame
        frames.notify();

        Self {
            layout: ScrollLayout {
                ratio: ScrollRatioEngine::new(),
                hero: HeroAnimator::new(config.hero.clone(), surfaces.hero),
                nav: NavVisibilityController::new(config.nav.clone(), surfaces.nav),
                scroll_y: 0.0,
                viewport,
                hero_state: None,
            },
            frames,
            pager,
            loads: PageLoads::new(),
            loader: Rc::new(loader),
            region: ContentRegion::Empty,
            quote: QuoteWidget::new(config.quote.clone(), surfaces.quote),
            contacts,
            modal: ModalViewer::new(config.modal.clone(), surfaces.modal),
            background: surfaces.background,
            content: config.content.clone(),
        }
    }

    /// Fetch the article catalog through `fetcher` and assemble the page
    pub async fn open(
        config: &FolioConfig,
        surfaces: HomeSurfaces,
        viewport: Viewport,
        fetcher: F,
    ) -> Result<Self, ContentError> {
        let urls = config.content.urls();
        let timeout = config.content.fetch_timeout();
        let catalog = Catalog::load(&fetcher, &urls, timeout).await?;
        let loader = CardLoader::new(fetcher, catalog, urls, timeout);
        Ok(Self::new(config, surfaces, viewport, loader))
    }

    /// Load the first page, the quote and the full-size background
    pub async fn start(&mut self, view: &mut impl PagerView) {
        self.pager.publish(view);
        let request = self.begin_load(self.pager.current_range());
        let outcomes = load_page(&self.loader, &request).await;
        self.complete_page(request, outcomes);

        self.load_quote().await;
        self.preload_background().await;
        info!(
            articles = self.loader.catalog().count(),
            pages = self.pager.max_page(),
            "home page ready"
        );
    }

    /// Route a scroll or resize event.
    ///
    /// Returns `true` when the host must request an animation frame.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match *event {
            Event::Scroll { y } => {
                self.layout.scroll_y = y;
                self.frames.notify()
            }
            Event::Resize { width, height } => {
                self.layout.viewport = Viewport::new(width, height);
                // Same ratio, different geometry
                self.layout.ratio.reset();
                self.frames.notify()
            }
            Event::PointerMove { .. } | Event::PointerLeave => false,
        }
    }

    /// Route a pointer event over contact card `index`.
    ///
    /// Returns `true` when the host must request an animation frame.
    pub fn handle_contact_event(&mut self, index: usize, event: &Event) -> bool {
        let Some(tilt) = self.contacts.get_mut(index) else {
            return false;
        };
        match *event {
            Event::PointerMove {
                x,
                y,
                width,
                height,
            } => tilt.pointer_move(x, y, width, height),
            Event::PointerLeave => {
                tilt.pointer_leave();
                false
            }
            Event::Scroll { .. } | Event::Resize { .. } => false,
        }
    }

    /// Open the image modal for a contact trigger (`"qq"`, `"wechat"`, ...)
    pub fn open_modal(&mut self, kind: &str) -> bool {
        self.modal.open(kind)
    }

    pub fn close_modal(&mut self) -> bool {
        self.modal.close()
    }

    /// Route a key press. Returns whether it was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.modal.handle_key(key)
    }

    pub fn handle_modal_click(&mut self, target: ModalClick) -> bool {
        self.modal.handle_click(target)
    }

    /// Run the animation frame. Returns whether any work was done.
    pub fn run_frame(&mut self, timestamp_ms: f64) -> bool {
        let mut ran = self.frames.run_frame(&mut self.layout, timestamp_ms);
        for tilt in &mut self.contacts {
            ran |= tilt.run_frame(timestamp_ms);
        }
        ran
    }

    /// Move the pager and start loading the new page.
    ///
    /// Returns `None` when the pager did not move.
    pub fn navigate(&mut self, nav: PageNav, view: &mut impl PagerView) -> Option<PageRequest> {
        let range = match nav {
            PageNav::To(page) => self.pager.go_to_page(page),
            PageNav::Next => self.pager.next(),
            PageNav::Previous => self.pager.previous(),
            PageNav::First => self.pager.first(),
            PageNav::Last => self.pager.last(),
        }?;
        self.pager.publish(view);
        Some(self.begin_load(Some(range)))
    }

    /// Validate jump input and start loading the target page
    pub fn jump(&mut self, input: &str, view: &mut impl PagerView) -> Option<PageRequest> {
        let range = self.pager.submit_jump(input, view)?;
        Some(self.begin_load(Some(range)))
    }

    /// Show the outcome of `request`, unless a later navigation superseded it.
    ///
    /// Returns whether the region was updated.
    pub fn complete_page(&mut self, request: PageRequest, outcomes: Vec<CardOutcome>) -> bool {
        if !self.loads.is_current(request.ticket) {
            debug!(page = request.ticket.page, "discarding superseded page load");
            return false;
        }
        self.region = ContentRegion::from_outcomes(request.ticket.page, outcomes);
        debug!(page = request.ticket.page, "page content ready");
        true
    }

    /// [`HomePage::navigate`] and wait for the cards
    pub async fn go(&mut self, nav: PageNav, view: &mut impl PagerView) -> bool {
        let Some(request) = self.navigate(nav, view) else {
            return false;
        };
        let loader = Rc::clone(&self.loader);
        let outcomes = load_page(&loader, &request).await;
        self.complete_page(request, outcomes)
    }

    /// [`HomePage::jump`] and wait for the cards
    pub async fn jump_and_load(&mut self, input: &str, view: &mut impl PagerView) -> bool {
        let Some(request) = self.jump(input, view) else {
            return false;
        };
        let loader = Rc::clone(&self.loader);
        let outcomes = load_page(&loader, &request).await;
        self.complete_page(request, outcomes)
    }

    /// Load a fresh quote
    pub async fn load_quote(&mut self) -> bool {
        let loader = Rc::clone(&self.loader);
        self.quote.load(loader.fetcher()).await
    }

    /// User-requested quote refresh; `false` while one is pending
    pub async fn refresh_quote(&mut self) -> bool {
        let loader = Rc::clone(&self.loader);
        self.quote.refresh(loader.fetcher()).await
    }

    /// Fetch the full-size hero background
    pub async fn preload_background(&mut self) -> bool {
        let loader = Rc::clone(&self.loader);
        let url = self.content.background_url();
        preload_background(
            loader.fetcher(),
            &url,
            self.content.fetch_timeout(),
            &mut self.background,
        )
        .await
    }

    fn begin_load(&mut self, range: Option<PageRange>) -> PageRequest {
        let page = self.pager.current_page();
        let ticket = self.loads.begin(page);
        self.region = ContentRegion::Loading { page };
        PageRequest { ticket, range }
    }

    /// Shared card loader, for running page loads outside the page
    pub fn loader(&self) -> Rc<CardLoader<F>> {
        Rc::clone(&self.loader)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn region(&self) -> &ContentRegion {
        &self.region
    }

    pub fn quote(&self) -> &QuoteWidget {
        &self.quote
    }

    pub fn modal(&self) -> &ModalViewer {
        &self.modal
    }

    /// Last ratio applied to the layout
    pub fn ratio(&self) -> Option<f32> {
        self.layout.ratio.last()
    }

    /// Hero state written by the last layout frame
    pub fn hero_state(&self) -> Option<HeroVisualState> {
        self.layout.hero_state
    }

    pub fn nav_visibility(&self) -> NavVisibility {
        self.layout.nav.visibility()
    }

    pub fn nav_locked(&self) -> bool {
        self.layout.nav.is_locked()
    }

    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    /// Frames that ran the scroll layout
    pub fn layout_frames(&self) -> u64 {
        self.frames.frames_run()
    }
}

impl<F> std::fmt::Debug for HomePage<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomePage")
            .field("viewport", &self.layout.viewport)
            .field("ratio", &self.layout.ratio.last())
            .field("page", &self.pager.current_page())
            .field("region", &self.region.page())
            .field("contacts", &self.contacts.len())
            .field("modal_open", &self.modal.is_open())
            .finish()
    }
}
