use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{DbError, DbResult};
use crate::storage::page::{PAGE_SIZE, TABLE_MAX_PAGES};

/// A single 4 KiB page of data.
pub struct Page {
    pub data: [u8; PAGE_SIZE],
}

impl Page {
    pub fn new() -> Self {
        Page { data: [0; PAGE_SIZE] }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Pager: maps page numbers to 4 KiB buffers backed by the database file.
///
/// Pages are read lazily on first reference and then stay resident until the
/// pager is closed. Nothing is written back before [`Pager::flush`] or
/// [`Pager::close`].
pub struct Pager {
    file: File,

    /// Bytes currently in the file, including pages flushed since open.
    file_length: u64,

    /// Pages the pager knows about: those on disk plus any handed out past
    /// the end of the file.
    num_pages: u32,

    /// `pages[page_num] = Some(..)` once that page has been touched.
    pages: Vec<Option<Box<Page>>>,
}

impl Pager {
    /// Open (or create) the database file at `path`.
    ///
    /// Fails with `CorruptFile` if the file is not a whole number of pages.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DbError::CorruptFile(format!(
                "file length {} is not a whole number of {}-byte pages",
                file_length, PAGE_SIZE
            )));
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;
        info!("Opened {} ({} pages on disk).", path.display(), num_pages);

        Ok(Pager {
            file,
            file_length,
            num_pages,
            pages: Vec::new(),
        })
    }

    /// Return the resident buffer for `page_num`, reading it from disk on
    /// first reference. Pages past the end of the file come back zeroed.
    pub fn get_page(&mut self, page_num: u32) -> DbResult<&mut Page> {
        if page_num >= TABLE_MAX_PAGES {
            return Err(DbError::PageOutOfRange {
                page_num,
                max: TABLE_MAX_PAGES,
            });
        }

        let idx = page_num as usize;
        if self.pages.len() <= idx {
            self.pages.resize_with(idx + 1, || None);
        }

        let page = match self.pages[idx].take() {
            Some(page) => page,
            None => self.load_page(page_num)?,
        };
        if page_num >= self.num_pages {
            self.num_pages = page_num + 1;
        }

        let page: &mut Page = self.pages[idx].insert(page);
        Ok(page)
    }

    fn load_page(&mut self, page_num: u32) -> DbResult<Box<Page>> {
        let mut page = Box::new(Page::new());
        let offset = page_num as u64 * PAGE_SIZE as u64;
        if offset < self.file_length {
            debug!("Loading page {} from disk.", page_num);
            self.file.seek(SeekFrom::Start(offset))?;
            self.file.read_exact(&mut page.data)?;
        } else {
            debug!("Allocating fresh page {}.", page_num);
        }
        Ok(page)
    }

    /// Write the resident page `page_num` back to its slot in the file.
    /// A page that was never touched is left alone.
    pub fn flush(&mut self, page_num: u32) -> DbResult<()> {
        let Some(page) = self.pages.get(page_num as usize).and_then(|p| p.as_deref()) else {
            return Ok(());
        };

        let offset = page_num as u64 * PAGE_SIZE as u64;
        debug!("Flushing page {} at offset {}.", page_num, offset);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&page.data)?;

        let end = offset + PAGE_SIZE as u64;
        if end > self.file_length {
            self.file_length = end;
        }
        Ok(())
    }

    /// Flush every resident page and release the file.
    pub fn close(mut self) -> DbResult<()> {
        let resident: Vec<u32> = (0..self.pages.len() as u32)
            .filter(|&n| self.is_resident(n))
            .collect();
        for page_num in &resident {
            self.flush(*page_num)?;
        }
        self.file.flush()?;
        self.file.sync_all()?;
        info!("Closed database ({} pages flushed).", resident.len());
        Ok(())
    }

    /// Size of the backing file in bytes, as of the last flush.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// How many pages does the pager know about right now (on-disk + newly handed out)?
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    pub fn is_resident(&self, page_num: u32) -> bool {
        matches!(self.pages.get(page_num as usize), Some(Some(_)))
    }
}
