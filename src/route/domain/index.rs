//! Secondary indexes over registered routes.

use super::{Route, RouteFilter, RouteId};
use std::collections::{BTreeMap, BTreeSet};

type Buckets = BTreeMap<String, BTreeSet<RouteId>>;

/// Pillar, realm, and service indexes mapping a value to route ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteIndexes {
    by_pillar: Buckets,
    by_realm: Buckets,
    by_service: Buckets,
}

fn add(buckets: &mut Buckets, value: Option<&str>, id: &RouteId) {
    if let Some(key) = value {
        buckets.entry(key.to_owned()).or_default().insert(id.clone());
    }
}

fn drop_member(buckets: &mut Buckets, value: Option<&str>, id: &RouteId) {
    let Some(key) = value else {
        return;
    };
    if let Some(bucket) = buckets.get_mut(key) {
        bucket.remove(id);
        if bucket.is_empty() {
            buckets.remove(key);
        }
    }
}

impl RouteIndexes {
    /// Adds a route to every bucket its fields name.
    pub fn insert(&mut self, route: &Route) {
        add(&mut self.by_pillar, route.pillar(), route.id());
        add(&mut self.by_realm, route.realm(), route.id());
        add(&mut self.by_service, route.service_name(), route.id());
    }

    /// Removes a route from every bucket its fields name.
    pub fn remove(&mut self, route: &Route) {
        drop_member(&mut self.by_pillar, route.pillar(), route.id());
        drop_member(&mut self.by_realm, route.realm(), route.id());
        drop_member(&mut self.by_service, route.service_name(), route.id());
    }

    /// Moves a route from the buckets of `previous` into those of `current`.
    pub fn replace(&mut self, previous: Option<&Route>, current: &Route) {
        if let Some(old) = previous {
            self.remove(old);
        }
        self.insert(current);
    }

    /// Returns the ids matching every criterion of `filter`, ordered by id.
    ///
    /// Returns `None` for an empty filter, meaning "all routes".
    #[must_use]
    pub fn matching(&self, filter: &RouteFilter) -> Option<BTreeSet<RouteId>> {
        let criteria = [
            (&self.by_pillar, filter.pillar.as_deref()),
            (&self.by_realm, filter.realm.as_deref()),
            (&self.by_service, filter.service_name.as_deref()),
        ];

        let mut result: Option<BTreeSet<RouteId>> = None;
        for (buckets, wanted) in criteria {
            let Some(value) = wanted else {
                continue;
            };
            let bucket = buckets.get(value).cloned().unwrap_or_default();
            result = Some(match result {
                Some(acc) => acc.intersection(&bucket).cloned().collect(),
                None => bucket,
            });
        }
        result
    }
}
