use candyprep::error::Error;
use candyprep::ml::clustering::{
    cut_maxclust, pairwise_euclidean, ward_linkage, AgglomerativeClustering,
};

// Two tight pairs far apart on the x axis
fn two_pairs() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 0.0],
        vec![10.0, 1.0],
    ]
}

#[test]
fn test_ward_linkage_merge_sequence() {
    let rows = two_pairs();
    let condensed = pairwise_euclidean(&rows);
    let merges = ward_linkage(&condensed, 4).unwrap();
    assert_eq!(merges.len(), 3);

    // The two unit-distance pairs merge first (ties resolve toward the
    // smallest pair), then the pair clusters join at a large distance
    assert_eq!((merges[0].left, merges[0].right), (0, 1));
    assert!((merges[0].distance - 1.0).abs() < 1e-12);
    assert_eq!(merges[0].size, 2);

    assert_eq!((merges[1].left, merges[1].right), (2, 3));
    assert!((merges[1].distance - 1.0).abs() < 1e-12);
    assert_eq!(merges[1].size, 2);

    assert_eq!((merges[2].left, merges[2].right), (4, 5));
    assert!(merges[2].distance > 10.0);
    assert_eq!(merges[2].size, 4);

    // Ward linkage is monotone
    assert!(merges[1].distance >= merges[0].distance);
    assert!(merges[2].distance >= merges[1].distance);
}

#[test]
fn test_cut_maxclust_levels() {
    let rows = two_pairs();
    let condensed = pairwise_euclidean(&rows);
    let merges = ward_linkage(&condensed, 4).unwrap();

    assert_eq!(cut_maxclust(&merges, 4, 2).unwrap(), vec![1, 1, 2, 2]);
    assert_eq!(cut_maxclust(&merges, 4, 4).unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(cut_maxclust(&merges, 4, 1).unwrap(), vec![1, 1, 1, 1]);
}

#[test]
fn test_cut_maxclust_rejects_bad_counts() {
    let rows = two_pairs();
    let condensed = pairwise_euclidean(&rows);
    let merges = ward_linkage(&condensed, 4).unwrap();

    assert!(matches!(
        cut_maxclust(&merges, 4, 0).unwrap_err(),
        Error::InvalidClusterCount {
            requested: 0,
            rows: 4
        }
    ));
    assert!(matches!(
        cut_maxclust(&merges, 4, 5).unwrap_err(),
        Error::InvalidClusterCount {
            requested: 5,
            rows: 4
        }
    ));
}

#[test]
fn test_labels_numbered_by_first_appearance() {
    // Same two groups, interleaved by row: the first row's group must get
    // label 1 regardless of merge order
    let rows = vec![
        vec![10.0, 0.0],
        vec![0.0, 0.0],
        vec![10.0, 1.0],
        vec![0.0, 1.0],
    ];
    let mut model = AgglomerativeClustering::new(2);
    model.fit(&rows).unwrap();
    assert_eq!(model.labels(), &[1, 2, 1, 2]);
}

#[test]
fn test_three_groups_on_a_line() {
    let rows = vec![
        vec![0.0],
        vec![0.1],
        vec![5.0],
        vec![5.1],
        vec![10.0],
    ];
    let mut model = AgglomerativeClustering::new(3);
    model.fit(&rows).unwrap();
    assert_eq!(model.labels(), &[1, 1, 2, 2, 3]);
    assert!(model.is_fitted());
}

#[test]
fn test_fit_validates_cluster_count() {
    let rows = two_pairs();

    let mut model = AgglomerativeClustering::new(0);
    assert!(matches!(
        model.fit(&rows).unwrap_err(),
        Error::InvalidClusterCount { requested: 0, .. }
    ));

    let mut model = AgglomerativeClustering::new(5);
    assert!(matches!(
        model.fit(&rows).unwrap_err(),
        Error::InvalidClusterCount {
            requested: 5,
            rows: 4
        }
    ));
}

#[test]
fn test_fit_validates_row_widths() {
    let rows = vec![vec![0.0, 1.0], vec![1.0]];
    let mut model = AgglomerativeClustering::new(1);
    assert!(matches!(
        model.fit(&rows).unwrap_err(),
        Error::InconsistentRowCount {
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn test_single_row_single_cluster() {
    let rows = vec![vec![1.0, 2.0]];
    let mut model = AgglomerativeClustering::new(1);
    model.fit(&rows).unwrap();
    assert_eq!(model.labels(), &[1]);
    assert!(model.merges().is_empty());
}
