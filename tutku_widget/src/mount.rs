//! The element the widget is mounted into.

use std::{borrow::Cow, cell::Cell};

use crate::{web, BootError};

/// Id of the mount point when none is configured.
pub const DEFAULT_MOUNT_ID: &str = "tutku-ai-chatbot-widget";

thread_local! {
    static NEXT_UNIQUE: Cell<u32> = Cell::new(0);
}

/// How the mount point's id is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountId {
    /// A reserved id. At most one widget per page can use it.
    Fixed(Cow<'static, str>),
    /// `<prefix>-<n>`, skipping ids already present in the document.
    Unique { prefix: Cow<'static, str> },
}

impl Default for MountId {
    fn default() -> Self {
        Self::Fixed(Cow::Borrowed(DEFAULT_MOUNT_ID))
    }
}

impl MountId {
    pub fn fixed(id: impl Into<Cow<'static, str>>) -> Self {
        Self::Fixed(id.into())
    }

    pub fn unique() -> Self {
        Self::Unique {
            prefix: Cow::Borrowed(DEFAULT_MOUNT_ID),
        }
    }

    /// Pick the id for a new mount point.
    ///
    /// `taken` reports whether an element with the given id already exists.
    pub fn resolve<F>(&self, taken: F) -> Result<String, BootError>
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Self::Fixed(id) => {
                if taken(id) {
                    Err(BootError::MountIdTaken(id.to_string()))
                } else {
                    Ok(id.to_string())
                }
            }
            Self::Unique { prefix } => loop {
                let n = NEXT_UNIQUE.with(|next| {
                    let n = next.get();
                    next.set(n.wrapping_add(1));
                    n
                });
                let candidate = format!("{}-{}", prefix, n);
                if !taken(&candidate) {
                    return Ok(candidate);
                }
            },
        }
    }
}

/// Create a `div` with an id chosen by `id` and append it to the body.
pub fn create_mount_point(
    doc: &web_sys::Document,
    id: &MountId,
) -> Result<web_sys::Element, BootError> {
    let body = web::body(doc)?;
    let id = id.resolve(|candidate| doc.get_element_by_id(candidate).is_some())?;

    let elem = doc.create_element("div")?;
    elem.set_id(&id);
    body.append_child(&elem)?;

    tracing::debug!(%id, "created mount point");
    Ok(elem)
}
