use crate::{SpqrNodeType, triconnected_blocks::outside_structures::Component};

/// Merges bonds sharing a virtual edge into one bond and polygons sharing a virtual edge into one
/// polygon. The shared virtual edge disappears.
///
/// Virtual edges are the ids `>= m`, each of them lies in exactly two split components.
pub(crate) fn merge_components(m: usize, edge_count: usize, split_components: Vec<Component>) -> Vec<Component> {
    // the two components of every virtual edge
    let mut holders = vec![[usize::MAX; 2]; edge_count];
    for (i, component) in split_components.iter().enumerate() {
        for &eid in component.edges.iter().filter(|&&eid| eid >= m) {
            let slot = if holders[eid][0] == usize::MAX { 0 } else { 1 };
            holders[eid][slot] = i;
        }
    }

    let mut merged_already = vec![false; split_components.len()];
    let mut ret = Vec::with_capacity(split_components.len());

    for (i, component) in split_components.iter().enumerate() {
        if merged_already[i] {
            continue;
        }
        merged_already[i] = true;

        if component.comp_type == SpqrNodeType::R {
            ret.push(component.clone());
            continue;
        }

        let mut collected_edges = component.edges.clone();
        let mut kept_edges = Vec::with_capacity(collected_edges.len());

        let mut j = 0;
        while j < collected_edges.len() {
            let eid = collected_edges[j];
            j += 1;

            if eid >= m {
                let [a, b] = holders[eid];
                let other_idx = if a == i { b } else { a };
                assert!(other_idx != usize::MAX, "virtual edge {eid} lies in one component");

                if !merged_already[other_idx]
                    && split_components[other_idx].comp_type == component.comp_type
                {
                    merged_already[other_idx] = true;

                    for &f in split_components[other_idx].edges.iter().filter(|&&f| f != eid) {
                        collected_edges.push(f);
                        if f >= m {
                            // `f` now belongs to the merged component
                            let slot = if holders[f][0] == other_idx { 0 } else { 1 };
                            holders[f][slot] = i;
                        }
                    }
                    continue; // the shared virtual edge is glued away
                }
            }

            kept_edges.push(eid);
        }

        ret.push(Component {
            edges: kept_edges,
            comp_type: component.comp_type,
        });
    }

    ret
}
