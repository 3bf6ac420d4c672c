pub mod bounding_box;
pub mod crs;
pub mod fs_utils;
pub mod geo_utils;
pub mod polygonal_rtree;
