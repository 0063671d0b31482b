use static_map_macros::static_map;

#[static_map(tags(X, Y, X))]
struct Point3<T>;

fn main() {}
