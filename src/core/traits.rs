use std::{rc::Rc, sync::Arc};

use crate::core::id::Id;

/// A trait used to expose the identifier of a known peer.
///
/// The routing table never inspects anything but the identifier: two contacts are the same entry
/// if and only if their identifiers are equal. Implementors must return the same identifier for
/// the lifetime of the value.
pub trait Contact {
    /// Returns the contact's identifier.
    fn id(&self) -> &Id;
}

impl Contact for Id {
    fn id(&self) -> &Id {
        self
    }
}

impl<T: Contact + ?Sized> Contact for &T {
    fn id(&self) -> &Id {
        (**self).id()
    }
}

impl<T: Contact + ?Sized> Contact for Box<T> {
    fn id(&self) -> &Id {
        (**self).id()
    }
}

impl<T: Contact + ?Sized> Contact for Rc<T> {
    fn id(&self) -> &Id {
        (**self).id()
    }
}

impl<T: Contact + ?Sized> Contact for Arc<T> {
    fn id(&self) -> &Id {
        (**self).id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Config, RoutingTable};

    struct Named {
        id: Id,
        #[allow(dead_code)]
        name: &'static str,
    }

    impl Contact for Named {
        fn id(&self) -> &Id {
            &self.id
        }
    }

    fn id_of<C: Contact>(contact: C) -> Id {
        contact.id().clone()
    }

    #[test]
    fn pointers_forward_the_id() {
        let id = Id::from(7);

        assert_eq!(id_of(&id), id);
        assert_eq!(id_of(Box::new(id.clone())), id);
        assert_eq!(id_of(Rc::new(id.clone())), id);
        assert_eq!(id_of(Arc::new(id.clone())), id);
    }

    #[test]
    fn trait_objects_are_routable() {
        let mut rt: RoutingTable<Arc<dyn Contact + Send + Sync>> =
            RoutingTable::new(Config::default().with_size(16));

        rt.put(Arc::new(Id::from(3)));
        rt.put(Arc::new(Named {
            id: Id::from(1),
            name: "a",
        }));

        let closest: Vec<Id> = rt
            .closest_contacts(&Id::from(2), 2)
            .iter()
            .map(|c| c.id().clone())
            .collect();
        assert_eq!(closest, vec![Id::from(1), Id::from(3)]);
    }
}
