/* src/server/engine/rust/src/pagination.rs */

//! Page arithmetic for paged listings. Everything here is pure; rendering
//! and event wiring live with the browser router.

/// One entry in the page-number control bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
  Page(usize),
  Ellipsis,
}

/// `ceil(item_count / page_size)`; a zero page size yields zero pages.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
  if page_size == 0 {
    return 0;
  }
  item_count.div_ceil(page_size)
}

/// Items shown on 1-based `page`. Out-of-range pages yield an empty slice.
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
  if page == 0 || page_size == 0 {
    return &[];
  }
  let start = (page - 1).saturating_mul(page_size);
  if start >= items.len() {
    return &[];
  }
  let end = start.saturating_add(page_size).min(items.len());
  &items[start..end]
}

/// Page numbers to display: always 1 and `total`, the neighbours of
/// `current` clamped to `[2, total - 1]`, and an ellipsis wherever that
/// window does not touch an anchor. At most seven slots.
pub fn visible_pages(total: usize, current: usize) -> Vec<PageSlot> {
  let mut visible = vec![PageSlot::Page(1)];
  if total <= 1 {
    return visible;
  }

  let range_start = current.saturating_sub(1).max(2);
  let range_end = current.saturating_add(1).min(total - 1);

  if range_start > 2 {
    visible.push(PageSlot::Ellipsis);
  }
  visible.extend((range_start..=range_end).map(PageSlot::Page));
  if range_end < total - 1 {
    visible.push(PageSlot::Ellipsis);
  }

  visible.push(PageSlot::Page(total));
  visible
}

/// Owned list plus the current page. `go_to` is the only mutator.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
  items: Vec<T>,
  page_size: usize,
  current: usize,
}

impl<T> Paginator<T> {
  pub fn new(items: Vec<T>, page_size: usize) -> Self {
    Self { items, page_size: page_size.max(1), current: 1 }
  }

  /// Start on `page`, clamped into the valid range (a bookmarked `?page=9`
  /// on a three-page list lands on page 3).
  pub fn starting_at(mut self, page: usize) -> Self {
    self.current = page.clamp(1, self.total_pages().max(1));
    self
  }

  pub fn page_size(&self) -> usize {
    self.page_size
  }

  pub fn current_page(&self) -> usize {
    self.current
  }

  pub fn total_pages(&self) -> usize {
    total_pages(self.items.len(), self.page_size)
  }

  pub fn page_items(&self) -> &[T] {
    page_slice(&self.items, self.page_size, self.current)
  }

  pub fn visible_pages(&self) -> Vec<PageSlot> {
    visible_pages(self.total_pages(), self.current)
  }

  pub fn has_prev(&self) -> bool {
    self.current > 1
  }

  pub fn has_next(&self) -> bool {
    self.current < self.total_pages()
  }

  /// Move to `page`. Returns false, leaving state untouched, when `page` is
  /// out of range or already current.
  pub fn go_to(&mut self, page: usize) -> bool {
    if page < 1 || page > self.total_pages() || page == self.current {
      return false;
    }
    self.current = page;
    true
  }

  pub fn prev(&mut self) -> bool {
    self.go_to(self.current.saturating_sub(1))
  }

  pub fn next(&mut self) -> bool {
    self.go_to(self.current + 1)
  }
}
