// Marching squares case templates
// Case index = tl*8 + tr*4 + br*2 + bl*1, a bit is set when the corner is inside

/// A point on the unit cell: one of the four corners or a crossing on one of the four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPoint {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
    /// Crossing on the bottom edge (bl -> br).
    Bottom,
    /// Crossing on the right edge (br -> tr).
    Right,
    /// Crossing on the top edge (tl -> tr).
    Top,
    /// Crossing on the left edge (bl -> tl).
    Left,
}

impl CellPoint {
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            CellPoint::BottomLeft | CellPoint::BottomRight | CellPoint::TopRight | CellPoint::TopLeft
        )
    }
}

/// Local geometry emitted for one case of the filled extractor.
#[derive(Debug, Clone, Copy)]
pub struct FillTemplate {
    pub points: &'static [CellPoint],
    /// Triangle list into `points`.
    pub triangles: &'static [u32],
}

use CellPoint::{Bottom, BottomLeft, BottomRight, Left, Right, Top, TopLeft, TopRight};

const EMPTY: FillTemplate = FillTemplate {
    points: &[],
    triangles: &[],
};

/// Full quad, only used when solid cells are requested.
pub const SOLID_CELL: FillTemplate = FillTemplate {
    points: &[BottomLeft, TopLeft, BottomRight, TopRight],
    triangles: &[0, 1, 3, 3, 2, 0],
};

/// Filled templates. Cases 0 and 15 are empty; 5 and 10 split into two disjoint triangles.
/// Every triangle winds clockwise in the xy plane.
pub static FILL_CASES: [FillTemplate; 16] = [
    // 0
    EMPTY,
    // 1: bl
    FillTemplate {
        points: &[BottomLeft, Left, Bottom],
        triangles: &[0, 1, 2],
    },
    // 2: br
    FillTemplate {
        points: &[Bottom, BottomRight, Right],
        triangles: &[0, 2, 1],
    },
    // 3: bl br
    FillTemplate {
        points: &[BottomLeft, Left, BottomRight, Right],
        triangles: &[0, 1, 2, 2, 1, 3],
    },
    // 4: tr
    FillTemplate {
        points: &[Top, Right, TopRight],
        triangles: &[0, 2, 1],
    },
    // 5: bl tr (saddle)
    FillTemplate {
        points: &[BottomLeft, Left, Bottom, Top, Right, TopRight],
        triangles: &[0, 1, 2, 3, 5, 4],
    },
    // 6: br tr
    FillTemplate {
        points: &[Bottom, Top, BottomRight, TopRight],
        triangles: &[0, 1, 2, 2, 1, 3],
    },
    // 7: bl br tr
    FillTemplate {
        points: &[BottomLeft, Left, Top, BottomRight, TopRight],
        triangles: &[3, 0, 1, 3, 1, 2, 3, 2, 4],
    },
    // 8: tl
    FillTemplate {
        points: &[Left, TopLeft, Top],
        triangles: &[0, 1, 2],
    },
    // 9: bl tl
    FillTemplate {
        points: &[BottomLeft, TopLeft, Bottom, Top],
        triangles: &[0, 1, 3, 3, 2, 0],
    },
    // 10: br tl (saddle)
    FillTemplate {
        points: &[Left, TopLeft, Bottom, Top, BottomRight, Right],
        triangles: &[0, 1, 3, 2, 5, 4],
    },
    // 11: bl br tl
    FillTemplate {
        points: &[BottomLeft, TopLeft, Top, BottomRight, Right],
        triangles: &[0, 1, 2, 0, 2, 4, 0, 4, 3],
    },
    // 12: tr tl
    FillTemplate {
        points: &[Left, TopLeft, Right, TopRight],
        triangles: &[0, 1, 3, 3, 2, 0],
    },
    // 13: bl tr tl
    FillTemplate {
        points: &[BottomLeft, TopLeft, Bottom, Right, TopRight],
        triangles: &[1, 2, 0, 1, 3, 2, 1, 4, 3],
    },
    // 14: br tr tl
    FillTemplate {
        points: &[Left, TopLeft, Bottom, BottomRight, TopRight],
        triangles: &[4, 3, 2, 4, 2, 0, 4, 0, 1],
    },
    // 15
    EMPTY,
];

/// Isoline segments per case. Complementary cases share the same edges.
pub static SEGMENT_CASES: [&[(CellPoint, CellPoint)]; 16] = [
    &[],
    &[(Left, Bottom)],
    &[(Bottom, Right)],
    &[(Left, Right)],
    &[(Top, Right)],
    &[(Left, Bottom), (Top, Right)],
    &[(Bottom, Top)],
    &[(Left, Top)],
    &[(Left, Top)],
    &[(Bottom, Top)],
    &[(Left, Top), (Bottom, Right)],
    &[(Top, Right)],
    &[(Left, Right)],
    &[(Bottom, Right)],
    &[(Left, Bottom)],
    &[],
];

/// Builds the case index from the four corner inside flags.
#[inline]
pub fn case_index(bl: bool, br: bool, tr: bool, tl: bool) -> usize {
    (tl as usize) << 3 | (tr as usize) << 2 | (br as usize) << 1 | bl as usize
}
