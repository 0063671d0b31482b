use static_map_macros::static_map;

#[static_map(tags(X, Y))]
struct Vec2<T>;

// Z is hand-declared; X and Y come from the Vec2 expansion above.
struct Z;

#[static_map(tags(X, Y, Z), no_declare)]
struct Vec3<T>;

#[test]
fn containers_share_a_tag_set_without_sharing_cells() {
    let mut a = Vec2::new(1, 2);
    let mut b = Vec3::new(10, 20, 30);
    a.set::<X>(5);
    b.set::<X>(50);
    assert_eq!(*a.get::<X>(), 5);
    assert_eq!(*a.get::<Y>(), 2);
    assert_eq!(*b.get::<X>(), 50);
    assert_eq!(*b.get::<Y>(), 20);
    assert_eq!(*b.get::<Z>(), 30);
}

#[test]
fn element_types_vary_per_container() {
    let a = Vec2::new("left", "right");
    let b = Vec3::new(1u8, 2, 3);
    assert_eq!(*a.get::<Y>(), "right");
    assert_eq!(*b.get::<Z>(), 3);
}
